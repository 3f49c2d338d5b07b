//! Error types for navigation data validation and serialization

use thiserror::Error;

/// Main error type for navigation data operations
#[derive(Error, Debug)]
pub enum NavDataError {
    /// A navigation entry has an empty display title
    #[error("navigation entry at '{path}' has an empty title")]
    EmptyTitle {
        /// Breadcrumb of the offending entry
        path: String,
    },

    /// A navigation entry has an empty link target
    #[error("navigation entry at '{path}' has an empty link")]
    EmptyLink {
        /// Breadcrumb of the offending entry
        path: String,
    },

    /// The index table does not line up with the generated pages
    #[error("index holds {entries} entries but the site has {pages} page fragments")]
    IndexMismatch {
        /// Entries in the index table
        entries: usize,
        /// Page fragments the site was generated with
        pages: usize,
    },

    /// Underlying serialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for navigation data operations
pub type Result<T> = std::result::Result<T, NavDataError>;
