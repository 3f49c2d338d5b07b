//! # Anchors
//!
//! Incremental computation for plain Rust values.
//!
//! Anchors lets you describe a value as a function of other values and then
//! keep it up to date cheaply. Inputs live in anchors created with
//! [`Engine::var`]; derived anchors built with the `map` family recompute
//! from one to four inputs. Mark the anchors you care about as observed, and
//! every read through [`Engine::get`] reflects all changes made with
//! [`Engine::set`], recomputing only the nodes a change actually reaches.
//!
//! ## Architecture
//!
//! - **Anchor**: cheap typed handle to a node in the computation graph
//! - **Engine**: owns the graph, tracks observation, schedules recomputes
//! - **Stabilization**: recomputes queued nodes lowest first, so inputs are
//!   always current before anything that reads them, and stops propagating
//!   wherever a recomputed value equals the old one
//!
//! ## Example
//!
//! ```
//! use anchors::Engine;
//!
//! let mut engine = Engine::new();
//!
//! let a = engine.var(2);
//! let b = engine.var(3);
//! let sum = engine.map2(&a, &b, |a, b| a + b);
//!
//! engine.observe(&sum);
//! assert_eq!(engine.get(&sum), 5);
//!
//! engine.set(&a, 10);
//! assert_eq!(engine.get(&sum), 13);
//! ```
//!
//! The engine is single-threaded by design; wrap it yourself if you need to
//! share it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod anchor;
pub mod engine;
pub mod value;

mod node;
mod store;

// Re-export main types
pub use anchor::Anchor;
pub use engine::Engine;
pub use value::NodeValue;

/// Anchors version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
