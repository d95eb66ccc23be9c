//! pathstep-core: Steppable shortest-path engines.
//!
//! A pure Rust library that holds a weighted directed graph and computes
//! shortest-path distances with Dijkstra, Floyd-Warshall, repeated Dijkstra
//! and two min-plus matrix strategies. Dijkstra and Floyd-Warshall record
//! every intermediate state so a caller can replay a run one step at a time.
//!
//! No I/O and no global state. The `pathstep-session` crate layers a stateful
//! session with configuration and JSON views on top of this one.

mod adjacency;
pub mod apsp;
pub mod dijkstra;
mod error;
pub mod floyd_warshall;
mod graph;
pub mod johnson;
mod matrix;
pub mod min_plus;
mod stepper;

#[cfg(test)]
mod test_graphs;

pub use adjacency::AdjacencyIndex;
pub use apsp::{AllPairs, AllPairsAlgorithm, UnknownAlgorithm};
pub use dijkstra::{DijkstraAction, DijkstraOutcome, DijkstraRun, DijkstraState, DijkstraStep};
pub use error::{GraphError, Result};
pub use floyd_warshall::{FloydWarshallPhase, FloydWarshallRun, FloydWarshallStep};
pub use graph::{dist_add, format_distance, Edge, Graph, NodeId, Weight, INF};
pub use matrix::DistanceMatrix;
pub use stepper::{Step, Stepper};
