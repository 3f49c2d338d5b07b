//! # Anchors Navdata
//!
//! Typed model of the navigation data behind the project documentation
//! site's sidebar.
//!
//! The generated site ships a small data script the viewer reads to build
//! its sidebar: a tree of `[title, link, children]` entries, a flat page
//! index, and the two tooltip strings of the panel-synchronisation toggle.
//! This crate models that data with owned types, validates it, and renders
//! it back to the script form. The data is produced once when the site is
//! generated and is immutable afterwards; nothing here implements the
//! generator's scanning or the viewer's runtime behavior.
//!
//! ## Example
//!
//! ```
//! use anchors_navdata::{render_script, site};
//!
//! let tree = site::nav_tree();
//! let index = site::nav_index();
//!
//! assert!(tree.validate().is_ok());
//! assert!(index.validate_for_pages(1).is_ok());
//!
//! let script = render_script(&tree, &index).unwrap();
//! assert!(script.starts_with("var NAVTREE ="));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod index;
pub mod script;
pub mod site;
pub mod tree;

// Re-export main types
pub use error::{NavDataError, Result};
pub use index::NavIndex;
pub use script::{render_script, SYNC_OFF_MESSAGE, SYNC_ON_MESSAGE};
pub use tree::{NavChildren, NavIter, NavNode, NavTree};

/// Anchors Navdata version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
