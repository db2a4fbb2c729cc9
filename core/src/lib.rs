//! page-graph-core: In-memory directed page graph analysis.
//!
//! A pure Rust library that maintains a label-indexed directed graph and its
//! transpose, and answers four queries over the current snapshot:
//! shortest path length (BFS), graph centers (minimum reachable
//! eccentricity), strongly connected components (Kosaraju) and a
//! minimum-cost Hamiltonian path (bitmask DP).
//!
//! Vertices are opaque string labels (page URLs in practice) mapped to dense
//! indices on first sight. Nothing is ever removed. Loading edge lists from
//! files or the network is left to the caller.
//!
//! ```
//! use page_graph_core::Graph;
//!
//! let mut g = Graph::new();
//! g.add_edge("A", "B");
//! g.add_edge("B", "C");
//! g.add_edge("C", "A");
//!
//! assert_eq!(g.shortest_path("A", "C"), Some(2));
//! assert_eq!(g.strongly_connected_components().len(), 1);
//! assert_eq!(g.centers().len(), 3);
//! assert!(g.hamiltonian_path().unwrap().is_some());
//! ```

pub mod centers;
mod config;
mod error;
mod graph;
pub mod hamiltonian;
mod registry;
pub mod scc;
pub mod traversal;

pub use config::{AnalysisConfig, DEFAULT_MAX_HAMILTONIAN_VERTICES, HARD_MAX_HAMILTONIAN_VERTICES};
pub use error::{GraphError, Result};
pub use graph::Graph;
pub use hamiltonian::{HamiltonianSolution, MISSING_EDGE_PENALTY};
pub use registry::VertexId;
