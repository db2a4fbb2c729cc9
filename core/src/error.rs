//! Error types for page-graph-core.

use thiserror::Error;

/// Errors raised by graph analysis queries.
///
/// Mutations never fail and unknown labels degrade to `None`, so the only
/// failures are resource guards and configuration mistakes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The Hamiltonian solver needs `n * 2^n` table entries; refused above the configured limit.
    #[error("Hamiltonian path search over {vertices} vertices exceeds the limit of {max}")]
    TooManyVertices { vertices: usize, max: usize },

    /// The DP table could not be allocated.
    #[error("Could not allocate a Hamiltonian table of {cells} cells")]
    TableAllocation { cells: usize },

    /// A configuration value is outside its accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, GraphError>;
