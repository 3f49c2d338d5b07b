//! Typed handles to nodes in a computation graph

use std::fmt;
use std::marker::PhantomData;

use crate::node::NodeId;

/// Typed handle to a node in an [`Engine`]'s computation graph.
///
/// An `Anchor<T>` does not hold the value itself; it names a node inside the
/// engine that created it, and all reads and writes go through that engine.
/// Handles are small and `Copy`, so they can be passed around and captured
/// freely.
///
/// The type parameter records the value type of the node, which makes reads
/// through the wrong type unrepresentable.
///
/// # Panics
///
/// Engine methods panic when handed an anchor created by a different
/// engine.
///
/// # Example
///
/// ```
/// use anchors::Engine;
///
/// let mut engine = Engine::new();
///
/// let name = engine.var(String::from("John"));
/// let greeting = engine.map(&name, |name| format!("Hello, {name}"));
///
/// engine.observe(&greeting);
/// assert_eq!(engine.get(&greeting), "Hello, John");
///
/// engine.set(&name, String::from("Samuel"));
/// assert_eq!(engine.get(&greeting), "Hello, Samuel");
/// ```
///
/// [`Engine`]: crate::Engine
pub struct Anchor<T> {
    node: NodeId,
    engine: u64,
    marker: PhantomData<fn() -> T>,
}

impl<T> Anchor<T> {
    pub(crate) fn new(node: NodeId, engine: u64) -> Self {
        Anchor {
            node,
            engine,
            marker: PhantomData,
        }
    }

    pub(crate) fn node_id(&self) -> NodeId {
        self.node
    }

    pub(crate) fn engine_id(&self) -> u64 {
        self.engine
    }
}

// Manual impls: the derives would bound `T`, and a handle is Copy/Debug
// regardless of its value type.

impl<T> Clone for Anchor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Anchor<T> {}

impl<T> fmt::Debug for Anchor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Anchor")
            .field("node", &self.node.index())
            .field("engine", &self.engine)
            .finish()
    }
}

impl<T> PartialEq for Anchor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.engine == other.engine
    }
}

impl<T> Eq for Anchor<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_copy() {
        let anchor: Anchor<i32> = Anchor::new(NodeId::new(3), 7);
        let copy = anchor;

        // Both usable after the copy
        assert_eq!(anchor, copy);
    }

    #[test]
    fn test_debug_names_node_and_engine() {
        let anchor: Anchor<String> = Anchor::new(NodeId::new(1), 2);
        let rendered = format!("{anchor:?}");

        assert!(rendered.contains("node: 1"));
        assert!(rendered.contains("engine: 2"));
    }
}
