//! Navigation data of this project's own documentation site
//!
//! The tree below mirrors the rendered README heading structure plus the
//! generated API reference sections, in document order. It is authored here
//! rather than scanned out of the sources; regenerating the site must
//! produce the same structure.

use crate::index::NavIndex;
use crate::tree::{NavNode, NavTree};

/// The navigation tree of the project documentation.
pub fn nav_tree() -> NavTree {
    NavTree::from(vec![NavNode::with_children(
        "Anchors",
        "index.html",
        vec![
            NavNode::with_children(
                "Usage",
                "index.html#autotoc_md1",
                vec![
                    NavNode::leaf("More Examples", "index.html#autotoc_md2"),
                    NavNode::with_children(
                        "String Concatenation",
                        "index.html#autotoc_md3",
                        vec![
                            NavNode::leaf(
                                "Using an Input of a Different Type",
                                "index.html#autotoc_md4",
                            ),
                            NavNode::leaf(
                                "Verifying That It Avoids Needless Computations",
                                "index.html#autotoc_md5",
                            ),
                        ],
                    ),
                    NavNode::leaf("Note", "index.html#autotoc_md6"),
                ],
            ),
            NavNode::leaf("Installation", "index.html#autotoc_md7"),
            NavNode::leaf("Roadmap", "index.html#autotoc_md8"),
            NavNode::with_children(
                "Classes",
                "annotated.html",
                vec![
                    NavNode::with_external("Class List", "annotated.html", "annotated_dup"),
                    NavNode::leaf("Class Index", "classes.html"),
                    NavNode::with_external("Class Hierarchy", "hierarchy.html", "hierarchy"),
                    NavNode::with_children(
                        "Class Members",
                        "functions.html",
                        vec![
                            NavNode::leaf("All", "functions.html"),
                            NavNode::leaf("Functions", "functions_func.html"),
                            NavNode::leaf("Typedefs", "functions_type.html"),
                        ],
                    ),
                ],
            ),
            NavNode::with_children(
                "Files",
                "files.html",
                vec![NavNode::with_external("File List", "files.html", "files_dup")],
            ),
        ],
    )])
}

/// The page index of the project documentation.
///
/// The site is small enough to fit one page chunk, so the table holds a
/// single placeholder suffix.
pub fn nav_index() -> NavIndex {
    NavIndex::from(vec![String::from(".html")])
}
