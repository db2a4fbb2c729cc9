use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Default cap on vertices for the Hamiltonian solver (~20M DP cells, ~40MB).
pub const DEFAULT_MAX_HAMILTONIAN_VERTICES: usize = 20;

/// Hard upper bound accepted for `max_hamiltonian_vertices`.
///
/// The solver keeps two byte tables of `n * 2^n` cells each, so 24 vertices
/// already needs ~800MB. Each step past this doubles it.
pub const HARD_MAX_HAMILTONIAN_VERTICES: usize = 24;

/// Tunables for analysis queries.
///
/// Deserializing validates every field; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AnalysisConfigFields")]
pub struct AnalysisConfig {
    /// Largest graph the Hamiltonian solver will attempt.
    pub max_hamiltonian_vertices: usize,
}

/// Unvalidated wire form of [`AnalysisConfig`].
#[derive(Deserialize)]
#[serde(default)]
struct AnalysisConfigFields {
    max_hamiltonian_vertices: usize,
}

impl Default for AnalysisConfigFields {
    fn default() -> Self {
        Self {
            max_hamiltonian_vertices: DEFAULT_MAX_HAMILTONIAN_VERTICES,
        }
    }
}

impl TryFrom<AnalysisConfigFields> for AnalysisConfig {
    type Error = GraphError;

    fn try_from(fields: AnalysisConfigFields) -> Result<Self> {
        Self::with_max_hamiltonian_vertices(fields.max_hamiltonian_vertices)
    }
}

impl AnalysisConfig {
    /// Build a config with an explicit Hamiltonian limit, validating the range.
    pub fn with_max_hamiltonian_vertices(max: usize) -> Result<Self> {
        let config = Self {
            max_hamiltonian_vertices: max,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.max_hamiltonian_vertices == 0
            || self.max_hamiltonian_vertices > HARD_MAX_HAMILTONIAN_VERTICES
        {
            return Err(GraphError::InvalidConfig(format!(
                "max_hamiltonian_vertices must be in 1..={}, got {}",
                HARD_MAX_HAMILTONIAN_VERTICES, self.max_hamiltonian_vertices
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_hamiltonian_vertices: DEFAULT_MAX_HAMILTONIAN_VERTICES,
        }
    }
}
