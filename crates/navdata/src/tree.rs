//! The navigation tree shown in the documentation sidebar

use crate::error::{NavDataError, Result};

/// One entry in the documentation sidebar.
///
/// An entry shows a title, links to a page or fragment, and may carry
/// children in document order. Entries own their children, so the structure
/// is a tree by construction; there is no way to express a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavNode {
    /// Display string shown in the sidebar.
    pub title: String,

    /// Page or fragment reference the entry links to.
    pub link: String,

    /// Ordered children of the entry.
    pub children: NavChildren,
}

/// Children of a navigation entry.
///
/// Most entries either have no children or nest them inline. A handful of
/// entries instead name a subtree that the site generator emits separately
/// and the viewer splices in at load time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavChildren {
    /// A leaf entry.
    #[default]
    None,

    /// Child entries nested inline, preserving document order.
    Inline(Vec<NavNode>),

    /// Name of a separately generated subtree.
    External(String),
}

impl NavNode {
    /// Create a leaf entry.
    pub fn leaf(title: impl Into<String>, link: impl Into<String>) -> Self {
        NavNode {
            title: title.into(),
            link: link.into(),
            children: NavChildren::None,
        }
    }

    /// Create an entry with inline children, in document order.
    pub fn with_children(
        title: impl Into<String>,
        link: impl Into<String>,
        children: Vec<NavNode>,
    ) -> Self {
        NavNode {
            title: title.into(),
            link: link.into(),
            children: NavChildren::Inline(children),
        }
    }

    /// Create an entry whose children live in a separately generated
    /// subtree.
    pub fn with_external(
        title: impl Into<String>,
        link: impl Into<String>,
        subtree: impl Into<String>,
    ) -> Self {
        NavNode {
            title: title.into(),
            link: link.into(),
            children: NavChildren::External(subtree.into()),
        }
    }

    /// Append a child, keeping document order.
    ///
    /// # Panics
    ///
    /// Panics if the entry's children are an external subtree; those are
    /// produced elsewhere and cannot be extended here.
    pub fn push_child(&mut self, child: NavNode) {
        match &mut self.children {
            NavChildren::None => self.children = NavChildren::Inline(vec![child]),
            NavChildren::Inline(children) => children.push(child),
            NavChildren::External(subtree) => {
                panic!("cannot add inline children to external subtree '{subtree}'")
            }
        }
    }

    /// Whether the entry has no children at all.
    pub fn is_leaf(&self) -> bool {
        matches!(self.children, NavChildren::None)
    }
}

/// The full navigation tree of a documentation site.
///
/// Root entries appear in document order. The tree is produced once when the
/// site is generated and not mutated afterwards; the mutating methods exist
/// for building it, not for runtime edits.
///
/// # Example
///
/// ```
/// use anchors_navdata::{NavNode, NavTree};
///
/// let tree = NavTree::from(vec![NavNode::with_children(
///     "Guide",
///     "index.html",
///     vec![
///         NavNode::leaf("Install", "install.html"),
///         NavNode::leaf("Use", "use.html"),
///     ],
/// )]);
///
/// assert!(tree.validate().is_ok());
/// assert_eq!(tree.node_count(), 3);
/// assert_eq!(tree.max_depth(), 2);
///
/// let titles: Vec<&str> = tree.iter().map(|node| node.title.as_str()).collect();
/// assert_eq!(titles, ["Guide", "Install", "Use"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavTree {
    roots: Vec<NavNode>,
}

impl From<Vec<NavNode>> for NavTree {
    fn from(roots: Vec<NavNode>) -> Self {
        NavTree { roots }
    }
}

impl NavTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        NavTree { roots: Vec::new() }
    }

    /// Append a root entry, keeping document order.
    pub fn push_root(&mut self, root: NavNode) {
        self.roots.push(root);
    }

    /// Root entries in document order.
    pub fn roots(&self) -> &[NavNode] {
        &self.roots
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Validation
    // ═══════════════════════════════════════════════════════════════════

    /// Check that every entry has a non-empty title and link.
    ///
    /// The first offender is reported with a breadcrumb of titles from the
    /// root, so the bad entry can be found in the generated data.
    pub fn validate(&self) -> Result<()> {
        fn walk(nodes: &[NavNode], parent: &str) -> Result<()> {
            for (position, node) in nodes.iter().enumerate() {
                let path = breadcrumb(parent, node, position);
                if node.title.is_empty() {
                    return Err(NavDataError::EmptyTitle { path });
                }
                if node.link.is_empty() {
                    return Err(NavDataError::EmptyLink { path });
                }
                if let NavChildren::Inline(children) = &node.children {
                    walk(children, &path)?;
                }
            }

            Ok(())
        }

        fn breadcrumb(parent: &str, node: &NavNode, position: usize) -> String {
            let name = if node.title.is_empty() {
                format!("#{position}")
            } else {
                node.title.clone()
            };
            if parent.is_empty() {
                name
            } else {
                format!("{parent} > {name}")
            }
        }

        walk(&self.roots, "")
    }

    // ═══════════════════════════════════════════════════════════════════
    // Traversal and Shape
    // ═══════════════════════════════════════════════════════════════════

    /// Visit every entry depth-first, in document order.
    pub fn iter(&self) -> NavIter<'_> {
        NavIter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Total number of entries in the tree.
    ///
    /// External subtrees count as the single entry that references them.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Length of the longest root-to-leaf chain.
    pub fn max_depth(&self) -> usize {
        fn depth_of(nodes: &[NavNode]) -> usize {
            nodes
                .iter()
                .map(|node| {
                    1 + match &node.children {
                        NavChildren::Inline(children) => depth_of(children),
                        _ => 0,
                    }
                })
                .max()
                .unwrap_or(0)
        }

        depth_of(&self.roots)
    }
}

/// Depth-first iterator over a [`NavTree`], yielding entries in document
/// order.
pub struct NavIter<'a> {
    stack: Vec<&'a NavNode>,
}

impl<'a> Iterator for NavIter<'a> {
    type Item = &'a NavNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let NavChildren::Inline(children) = &node.children {
            for child in children.iter().rev() {
                self.stack.push(child);
            }
        }

        Some(node)
    }
}
