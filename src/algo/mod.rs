//! Query engines over a snapshot's matrices.
//!
//! Both engines are pure functions of the matrices they are handed: no
//! shared state, no I/O, safe to run concurrently on the same snapshot.

pub mod reachability;
pub mod shortest_path;

pub use reachability::{reachability_closure, transitive_closure};
pub use shortest_path::{dijkstra, shortest_path, ShortestPaths};
