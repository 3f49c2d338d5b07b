//! Per-node bookkeeping for the computation graph

use indexmap::IndexSet;

use crate::value::NodeValue;

/// Index of a node in its engine's store.
///
/// Ids are never reused: the store only grows for the lifetime of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub(crate) fn index(&self) -> usize {
        self.0
    }
}

/// Recompute function of a derived node.
///
/// Receives the current values of the node's dependencies, in creation order,
/// and returns the freshly computed value.
pub(crate) type Updater = Box<dyn FnMut(&[&dyn NodeValue]) -> Box<dyn NodeValue>>;

/// A single node in the computation graph.
///
/// Input nodes hold a value directly and have no updater; derived nodes
/// recompute their value from their dependencies. The id stamps record, in
/// stabilization numbers, when the node last recomputed and when its value
/// last changed. A node is live (worth keeping up to date) only while its
/// necessary count is positive.
pub(crate) struct Node {
    /// Current value; `None` for a derived node that has not run yet.
    pub(crate) value: Option<Box<dyn NodeValue>>,

    /// Recompute function; `None` for input nodes.
    pub(crate) updater: Option<Updater>,

    /// Nodes this node reads, in updater argument order.
    pub(crate) dependencies: Vec<NodeId>,

    /// Nodes that read this node. Maintained while they are necessary.
    pub(crate) dependents: IndexSet<NodeId>,

    /// Distance from the inputs: 0 for an input, max over dependencies + 1
    /// for a derived node.
    pub(crate) height: usize,

    /// How many observation traversals currently reach this node.
    pub(crate) necessary: usize,

    /// Stabilization number of the last recompute.
    pub(crate) recompute_id: u64,

    /// Stabilization number of the last value change.
    pub(crate) change_id: u64,

    /// Whether the updater has produced a value at least once.
    pub(crate) ever_computed: bool,
}

impl Node {
    /// An input node starts out holding its value.
    pub(crate) fn input(value: Box<dyn NodeValue>) -> Self {
        Node {
            value: Some(value),
            updater: None,
            dependencies: Vec::new(),
            dependents: IndexSet::new(),
            height: 0,
            necessary: 0,
            recompute_id: 0,
            change_id: 0,
            ever_computed: false,
        }
    }

    /// A derived node has no value until its first recompute.
    pub(crate) fn derived(updater: Updater, dependencies: Vec<NodeId>, height: usize) -> Self {
        Node {
            value: None,
            updater: Some(updater),
            dependencies,
            dependents: IndexSet::new(),
            height,
            necessary: 0,
            recompute_id: 0,
            change_id: 0,
            ever_computed: false,
        }
    }

    pub(crate) fn is_input(&self) -> bool {
        self.updater.is_none()
    }

    /// True while at least one observed anchor depends on this node,
    /// directly or indirectly.
    pub(crate) fn is_necessary(&self) -> bool {
        self.necessary > 0
    }
}
