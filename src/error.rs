/// Errors raised by the disjoint-set forest
use std::fmt;

/// Contract violations reported by [`crate::forest::DisjointSetForest`].
///
/// Neither variant is retryable: both mean the caller passed an argument the
/// forest cannot accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForestError {
    /// An element index outside `[0, len)`
    IndexOutOfRange { index: usize, len: usize },
    /// A construction argument that cannot describe a forest (e.g. a negative element count)
    InvalidArgument(String),
}

impl fmt::Display for ForestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForestError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for forest of {len} elements")
            }
            ForestError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for ForestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ForestError::IndexOutOfRange { index: 7, len: 5 };
        assert_eq!(err.to_string(), "index 7 out of range for forest of 5 elements");

        let err = ForestError::InvalidArgument("element count -1 is negative".into());
        assert_eq!(err.to_string(), "invalid argument: element count -1 is negative");
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = ForestError::IndexOutOfRange { index: 0, len: 0 }.into();
        assert!(err.downcast_ref::<ForestError>().is_some());
    }
}
