//! The flat page index accompanying the navigation tree

use crate::error::{NavDataError, Result};

/// Flat table of page-fragment suffixes, parallel to the generated page
/// list.
///
/// The viewer uses this table to find which page chunk a link lives in. A
/// small site carries a single placeholder entry; larger sites carry one
/// entry per generated chunk. Order matters, duplicates do not occur but are
/// not rejected here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavIndex {
    entries: Vec<String>,
}

impl From<Vec<String>> for NavIndex {
    fn from(entries: Vec<String>) -> Self {
        NavIndex { entries }
    }
}

impl NavIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        NavIndex {
            entries: Vec::new(),
        }
    }

    /// Append an entry, keeping generation order.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Entries in generation order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that the index lines up with the number of generated page
    /// fragments.
    pub fn validate_for_pages(&self, pages: usize) -> Result<()> {
        if self.entries.len() != pages {
            return Err(NavDataError::IndexMismatch {
                entries: self.entries.len(),
                pages,
            });
        }

        Ok(())
    }
}
