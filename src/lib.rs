// Library exports for dsforest
pub mod components;
pub mod error;
pub mod forest;
pub mod giant;
pub mod labels;
pub mod script;

pub use error::ForestError;
pub use forest::DisjointSetForest;
