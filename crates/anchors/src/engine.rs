//! The engine driving incremental recomputation

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexSet;
use tracing::{debug, trace, warn};

use crate::anchor::Anchor;
use crate::node::{Node, NodeId, Updater};
use crate::store::NodeStore;
use crate::value::{downcast, NodeValue};

/// Engine ids disambiguate anchors across engines in the same process.
static NEXT_ENGINE_ID: AtomicU64 = AtomicU64::new(0);

/// The engine owning the computation graph and keeping observed anchors up
/// to date.
///
/// Values live in input anchors created with [`var`](Engine::var); derived
/// anchors created with the `map` family recompute from their inputs. The
/// engine only does work for anchors that are [observed](Engine::observe):
/// when an input changes, the dependents of the change are queued, and the
/// next read of an observed anchor recomputes exactly the queued nodes whose
/// inputs really changed, in height order, cutting off propagation wherever
/// a recomputed value comes out equal to the old one.
///
/// The engine is not thread-safe; share it within one thread only.
///
/// # Example
///
/// ```
/// use anchors::Engine;
///
/// let mut engine = Engine::new();
///
/// let width = engine.var(4);
/// let height = engine.var(5);
/// let area = engine.map2(&width, &height, |w, h| w * h);
///
/// engine.observe(&area);
/// assert_eq!(engine.get(&area), 20);
///
/// engine.set(&width, 10);
/// assert_eq!(engine.get(&area), 50);
/// ```
pub struct Engine {
    /// Identity baked into every anchor this engine creates.
    engine_id: u64,

    /// All nodes, indexed by the ids inside anchors.
    store: NodeStore,

    /// Anchors currently marked observed.
    observed: IndexSet<NodeId>,

    /// Nodes waiting to be recomputed, lowest height first.
    heap: BinaryHeap<Reverse<(usize, NodeId)>>,

    /// Nodes currently in `heap`, so each is queued at most once.
    queued: HashSet<NodeId>,

    /// Monotone counter stamping recomputes and value changes.
    stabilization: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Engine {
            engine_id: NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed),
            store: NodeStore::new(),
            observed: IndexSet::new(),
            heap: BinaryHeap::new(),
            queued: HashSet::new(),
            stabilization: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Anchor Creation
    // ═══════════════════════════════════════════════════════════════════

    /// Create an input anchor holding `value`.
    ///
    /// Input anchors sit at the bottom of the graph; their values change only
    /// through [`set`](Engine::set).
    pub fn var<T>(&mut self, value: T) -> Anchor<T>
    where
        T: Clone + PartialEq + 'static,
    {
        let id = self.store.insert(Node::input(Box::new(value)));
        trace!(node = id.index(), "created input anchor");

        Anchor::new(id, self.engine_id)
    }

    /// Create an anchor computed from one input anchor.
    ///
    /// `updater` runs whenever the engine decides the anchor is out of date.
    /// The input type may differ from the output type.
    ///
    /// # Example
    ///
    /// ```
    /// use anchors::Engine;
    ///
    /// let mut engine = Engine::new();
    ///
    /// let orders = engine.var(vec![150, 200, 300]);
    /// let largest = engine.map(&orders, |v| v.iter().copied().max().unwrap_or(0));
    ///
    /// engine.observe(&largest);
    /// assert_eq!(engine.get(&largest), 300);
    /// ```
    pub fn map<I, T, F>(&mut self, input: &Anchor<I>, mut updater: F) -> Anchor<T>
    where
        I: 'static,
        T: Clone + PartialEq + 'static,
        F: FnMut(&I) -> T + 'static,
    {
        let input = self.check(input);
        let erased: Updater = Box::new(move |values: &[&dyn NodeValue]| -> Box<dyn NodeValue> {
            Box::new(updater(downcast::<I>(values[0])))
        });

        self.derived(erased, vec![input])
    }

    /// Create an anchor computed from two input anchors.
    pub fn map2<I1, I2, T, F>(
        &mut self,
        first: &Anchor<I1>,
        second: &Anchor<I2>,
        mut updater: F,
    ) -> Anchor<T>
    where
        I1: 'static,
        I2: 'static,
        T: Clone + PartialEq + 'static,
        F: FnMut(&I1, &I2) -> T + 'static,
    {
        let first = self.check(first);
        let second = self.check(second);
        let erased: Updater = Box::new(move |values: &[&dyn NodeValue]| -> Box<dyn NodeValue> {
            Box::new(updater(
                downcast::<I1>(values[0]),
                downcast::<I2>(values[1]),
            ))
        });

        self.derived(erased, vec![first, second])
    }

    /// Create an anchor computed from three input anchors.
    pub fn map3<I1, I2, I3, T, F>(
        &mut self,
        first: &Anchor<I1>,
        second: &Anchor<I2>,
        third: &Anchor<I3>,
        mut updater: F,
    ) -> Anchor<T>
    where
        I1: 'static,
        I2: 'static,
        I3: 'static,
        T: Clone + PartialEq + 'static,
        F: FnMut(&I1, &I2, &I3) -> T + 'static,
    {
        let first = self.check(first);
        let second = self.check(second);
        let third = self.check(third);
        let erased: Updater = Box::new(move |values: &[&dyn NodeValue]| -> Box<dyn NodeValue> {
            Box::new(updater(
                downcast::<I1>(values[0]),
                downcast::<I2>(values[1]),
                downcast::<I3>(values[2]),
            ))
        });

        self.derived(erased, vec![first, second, third])
    }

    /// Create an anchor computed from four input anchors.
    pub fn map4<I1, I2, I3, I4, T, F>(
        &mut self,
        first: &Anchor<I1>,
        second: &Anchor<I2>,
        third: &Anchor<I3>,
        fourth: &Anchor<I4>,
        mut updater: F,
    ) -> Anchor<T>
    where
        I1: 'static,
        I2: 'static,
        I3: 'static,
        I4: 'static,
        T: Clone + PartialEq + 'static,
        F: FnMut(&I1, &I2, &I3, &I4) -> T + 'static,
    {
        let first = self.check(first);
        let second = self.check(second);
        let third = self.check(third);
        let fourth = self.check(fourth);
        let erased: Updater = Box::new(move |values: &[&dyn NodeValue]| -> Box<dyn NodeValue> {
            Box::new(updater(
                downcast::<I1>(values[0]),
                downcast::<I2>(values[1]),
                downcast::<I3>(values[2]),
                downcast::<I4>(values[3]),
            ))
        });

        self.derived(erased, vec![first, second, third, fourth])
    }

    /// Insert a derived node one level above its highest dependency.
    fn derived<T>(&mut self, updater: Updater, dependencies: Vec<NodeId>) -> Anchor<T> {
        let height = dependencies
            .iter()
            .map(|dependency| self.store.node(*dependency).height)
            .max()
            .map_or(0, |highest| highest + 1);
        let id = self
            .store
            .insert(Node::derived(updater, dependencies, height));
        trace!(node = id.index(), height, "created derived anchor");

        Anchor::new(id, self.engine_id)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Observation
    // ═══════════════════════════════════════════════════════════════════

    /// Mark an anchor as observed.
    ///
    /// An observed anchor is guaranteed up to date when read with
    /// [`get`](Engine::get). Everything the anchor depends on is marked
    /// necessary, and anything already out of date is queued for the next
    /// stabilization. Observing an anchor twice is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the anchor belongs to a different engine.
    pub fn observe<T>(&mut self, anchor: &Anchor<T>) {
        let id = self.check(anchor);
        if !self.observed.insert(id) {
            return;
        }

        debug!(node = id.index(), "observing anchor");

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }

            self.store.node_mut(current).necessary += 1;
            if self.stale(current) {
                self.queue(current);
            }

            let dependencies = self.store.node(current).dependencies.clone();
            for dependency in dependencies {
                self.store.node_mut(dependency).dependents.insert(current);
                stack.push(dependency);
            }
        }
    }

    /// Mark every anchor in the slice as observed.
    pub fn observe_all<T>(&mut self, anchors: &[Anchor<T>]) {
        for anchor in anchors {
            self.observe(anchor);
        }
    }

    /// Mark an anchor as unobserved.
    ///
    /// Reverses one [`observe`](Engine::observe): necessary counts drop along
    /// the same traversal, and dependent edges are dropped for nodes that no
    /// longer need updates. Nodes shared with other observed anchors stay
    /// necessary. Unobserving an anchor that is not observed is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the anchor belongs to a different engine.
    pub fn unobserve<T>(&mut self, anchor: &Anchor<T>) {
        let id = self.check(anchor);
        if !self.observed.shift_remove(&id) {
            return;
        }

        debug!(node = id.index(), "unobserving anchor");

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }

            let node = self.store.node_mut(current);
            if node.necessary == 0 {
                // Observe and unobserve traverse symmetrically, so the count
                // should never be short here; tolerate instead of wrapping.
                warn!(node = current.index(), "necessary count underflow");
            } else {
                node.necessary -= 1;
            }
            let still_necessary = node.is_necessary();

            let dependencies = self.store.node(current).dependencies.clone();
            for dependency in dependencies {
                if !still_necessary {
                    self.store
                        .node_mut(dependency)
                        .dependents
                        .shift_remove(&current);
                }
                stack.push(dependency);
            }
        }
    }

    /// Whether the anchor is currently observed.
    ///
    /// # Panics
    ///
    /// Panics if the anchor belongs to a different engine.
    pub fn is_observed<T>(&self, anchor: &Anchor<T>) -> bool {
        self.observed.contains(&self.check(anchor))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Reading and Writing
    // ═══════════════════════════════════════════════════════════════════

    /// Return the current value of the anchor.
    ///
    /// Reading an observed anchor stabilizes first, so the result is always
    /// up to date. Reading an unobserved anchor returns whatever value the
    /// node last held, which may be stale.
    ///
    /// # Panics
    ///
    /// Panics if the anchor is a derived anchor that has never been computed
    /// (observe it before reading, or use [`try_get`](Engine::try_get)), or
    /// if it belongs to a different engine.
    pub fn get<T>(&mut self, anchor: &Anchor<T>) -> T
    where
        T: Clone + 'static,
    {
        let id = self.check(anchor);
        if self.observed.contains(&id) {
            self.stabilize();
        }

        match &self.store.node(id).value {
            Some(value) => downcast::<T>(value.as_ref()).clone(),
            None => panic!("anchor has never been computed; observe it before reading"),
        }
    }

    /// Return the current value of the anchor, or `None` if it has never
    /// been computed.
    ///
    /// Same read semantics as [`get`](Engine::get) otherwise: observed
    /// anchors stabilize first, unobserved anchors may read stale.
    ///
    /// # Panics
    ///
    /// Panics if the anchor belongs to a different engine.
    pub fn try_get<T>(&mut self, anchor: &Anchor<T>) -> Option<T>
    where
        T: Clone + 'static,
    {
        let id = self.check(anchor);
        if self.observed.contains(&id) {
            self.stabilize();
        }

        self.store
            .node(id)
            .value
            .as_ref()
            .map(|value| downcast::<T>(value.as_ref()).clone())
    }

    /// Set the value of an anchor.
    ///
    /// Writing a value equal to the current one is a no-op. Otherwise the
    /// change is recorded and every necessary dependent is queued, so
    /// observed anchors downstream return up-to-date values on their next
    /// read.
    ///
    /// Setting a derived anchor is allowed: the written value propagates like
    /// any other change, but is overwritten the next time the anchor itself
    /// recomputes.
    ///
    /// # Panics
    ///
    /// Panics if the anchor belongs to a different engine.
    pub fn set<T>(&mut self, anchor: &Anchor<T>, value: T)
    where
        T: Clone + PartialEq + 'static,
    {
        let id = self.check(anchor);
        if let Some(old) = &self.store.node(id).value {
            if old.value_eq(&value) {
                return;
            }
        }

        self.stabilization += 1;
        let stamp = self.stabilization;
        debug!(node = id.index(), stabilization = stamp, "value set");

        let node = self.store.node_mut(id);
        node.change_id = stamp;
        node.value = Some(Box::new(value));
        let necessary = node.is_necessary();
        let dependents: Vec<NodeId> = node.dependents.iter().copied().collect();

        if necessary {
            for dependent in dependents {
                if self.store.node(dependent).is_necessary() {
                    self.queue(dependent);
                }
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Number of nodes in the graph.
    ///
    /// Nodes are never reclaimed, so this only grows.
    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Stabilization
    // ═══════════════════════════════════════════════════════════════════

    /// Bring every queued node up to date.
    ///
    /// Nodes come off the queue lowest height first, so a node's dependencies
    /// are always current by the time it recomputes. A node whose recomputed
    /// value equals its old value does not wake its dependents.
    fn stabilize(&mut self) {
        if self.heap.is_empty() {
            return;
        }

        self.stabilization += 1;
        debug!(
            stabilization = self.stabilization,
            queued = self.heap.len(),
            "stabilizing"
        );

        while let Some(Reverse((_, id))) = self.heap.pop() {
            self.queued.remove(&id);

            // Queued state can go quiet, e.g. when a node was unobserved
            // after being queued.
            if !self.stale(id) {
                continue;
            }

            let changed = self.recompute(id);
            trace!(node = id.index(), changed, "recomputed");

            if changed {
                let dependents: Vec<NodeId> =
                    self.store.node(id).dependents.iter().copied().collect();
                for dependent in dependents {
                    if self.store.node(dependent).is_necessary() {
                        self.queue(dependent);
                    }
                }
            }
        }
    }

    /// Run the node's updater and store the result.
    ///
    /// Returns whether the value changed. The change id advances only on a
    /// real change, which is what stops propagation at equal values.
    fn recompute(&mut self, id: NodeId) -> bool {
        if self.store.node(id).recompute_id == self.stabilization {
            // Already ran during this stabilization.
            return self.store.node(id).change_id == self.stabilization;
        }

        // Take the updater out so the store stays borrowable for the
        // dependency values the updater reads.
        let mut updater = match self.store.node_mut(id).updater.take() {
            Some(updater) => updater,
            None => return false,
        };

        let dependencies = self.store.node(id).dependencies.clone();
        let new_value = {
            let values: Vec<&dyn NodeValue> = dependencies
                .iter()
                .map(|dependency| self.store.value_of(*dependency))
                .collect();
            updater(&values)
        };

        let stamp = self.stabilization;
        let node = self.store.node_mut(id);
        node.updater = Some(updater);
        node.recompute_id = stamp;
        node.ever_computed = true;

        let changed = match &node.value {
            Some(old) => !old.value_eq(new_value.as_ref()),
            None => true,
        };
        if changed {
            node.change_id = stamp;
            node.value = Some(new_value);
        }

        changed
    }

    /// Whether the node needs a recompute.
    ///
    /// Stale means: necessary, derived, and either never computed or
    /// recomputed before one of its dependencies last changed.
    fn stale(&self, id: NodeId) -> bool {
        let node = self.store.node(id);
        if !node.is_necessary() || node.is_input() {
            return false;
        }
        if !node.ever_computed {
            return true;
        }

        node.dependencies
            .iter()
            .any(|dependency| node.recompute_id < self.store.node(*dependency).change_id)
    }

    /// Queue a node for recomputation unless it is already queued.
    fn queue(&mut self, id: NodeId) {
        if self.queued.insert(id) {
            let height = self.store.node(id).height;
            self.heap.push(Reverse((height, id)));
        }
    }

    /// Resolve an anchor to its node id, refusing handles from other engines.
    fn check<T>(&self, anchor: &Anchor<T>) -> NodeId {
        assert!(
            anchor.engine_id() == self.engine_id,
            "anchor belongs to a different engine"
        );

        anchor.node_id()
    }
}
