/// Dense integer ids for string labels
use indexmap::IndexSet;

/// Maps labels to forest element ids in first-seen order
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    /// Label at position `id`
    names: IndexSet<String>,
}

impl LabelIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create an ID for a label
    /// Returns the ID (creating a new one if the label is new)
    pub fn get_or_insert(&mut self, name: &str) -> usize {
        if let Some(id) = self.names.get_index_of(name) {
            id
        } else {
            self.names.insert_full(name.to_string()).0
        }
    }

    /// Get the label for an ID
    pub fn get_name(&self, id: usize) -> Option<&str> {
        self.names.get_index(id).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
