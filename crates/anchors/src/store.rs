//! Flat node storage for a single engine

use crate::node::{Node, NodeId};
use crate::value::NodeValue;

/// All nodes of one engine in a flat array, addressed by [`NodeId`].
///
/// Nodes are appended on anchor creation and never removed, so a `NodeId`
/// stays valid for the lifetime of the engine.
pub(crate) struct NodeStore {
    nodes: Vec<Node>,
}

impl NodeStore {
    pub(crate) fn new() -> Self {
        NodeStore { nodes: Vec::new() }
    }

    /// Append a node and return its id.
    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Value of `id`, which must have one.
    ///
    /// Recomputes run in height order, so every dependency holds a value by
    /// the time a dependent's updater reads it.
    pub(crate) fn value_of(&self, id: NodeId) -> &dyn NodeValue {
        match &self.nodes[id.index()].value {
            Some(value) => value.as_ref(),
            None => panic!("node {} was read before it was ever computed", id.index()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}
