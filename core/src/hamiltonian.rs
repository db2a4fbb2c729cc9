//! Minimum-cost Hamiltonian path via bitmask dynamic programming.
//!
//! `dp[S][v]` is the cheapest way to visit exactly the vertex subset `S`
//! (a bitmask) ending at `v`. Moving from `k` to `v` is free when the forward
//! edge `k → v` exists and costs [`MISSING_EDGE_PENALTY`] otherwise, so every
//! permutation has a finite cost and a zero-cost one is a genuine
//! Hamiltonian path.
//!
//! All penalties are equal, so the table stores the number of missing edges
//! (one byte per cell) and the cost is scaled on the way out.
//!
//! Time O(n² · 2ⁿ), space O(n · 2ⁿ). Only usable for small graphs; the
//! vertex count is checked against [`AnalysisConfig::max_hamiltonian_vertices`]
//! before anything is allocated.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::AnalysisConfig;
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::registry::VertexId;

/// Cost charged for stepping between two vertices with no forward edge.
pub const MISSING_EDGE_PENALTY: u64 = 1 << 32;

const UNREACHED: u8 = u8::MAX;
const NO_PREDECESSOR: u8 = u8::MAX;

/// Least-cost visiting order over every vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HamiltonianSolution {
    /// Vertex labels in visiting order. Empty only for an empty graph.
    pub order: Vec<String>,
    /// Total cost: `missing_edges * MISSING_EDGE_PENALTY`.
    pub cost: u64,
    /// Consecutive pairs in `order` with no forward edge between them.
    pub missing_edges: usize,
}

impl HamiltonianSolution {
    /// True when every consecutive step follows a real edge.
    pub fn is_hamiltonian(&self) -> bool {
        self.missing_edges == 0
    }
}

/// Run the DP and return the least-cost ordering, whether or not it is a
/// true Hamiltonian path.
#[instrument(skip(graph, config), fields(vertices = graph.vertex_count()))]
pub fn solve(graph: &Graph, config: &AnalysisConfig) -> Result<HamiltonianSolution> {
    config.validate()?;

    let n = graph.vertex_count();
    if n > config.max_hamiltonian_vertices {
        return Err(GraphError::TooManyVertices {
            vertices: n,
            max: config.max_hamiltonian_vertices,
        });
    }
    if n == 0 {
        return Ok(HamiltonianSolution {
            order: Vec::new(),
            cost: 0,
            missing_edges: 0,
        });
    }

    let (order, missing) = least_cost_order(graph)?;
    let solution = HamiltonianSolution {
        order: graph.labels_for(&order),
        cost: missing as u64 * MISSING_EDGE_PENALTY,
        missing_edges: missing,
    };
    debug!(missing_edges = missing, "hamiltonian search finished");
    Ok(solution)
}

/// A Hamiltonian path if one exists.
///
/// `Some(vec![])` for an empty graph, `None` when every ordering needs at
/// least one missing edge.
pub fn hamiltonian_path(graph: &Graph, config: &AnalysisConfig) -> Result<Option<Vec<String>>> {
    let solution = solve(graph, config)?;
    Ok(solution.is_hamiltonian().then_some(solution.order))
}

/// Fill the DP table and reconstruct the best ordering as vertex indices.
///
/// Requires `1 <= n <= HARD_MAX_HAMILTONIAN_VERTICES`.
fn least_cost_order(graph: &Graph) -> Result<(Vec<VertexId>, usize)> {
    let n = graph.vertex_count();
    let subsets = 1usize << n;
    let cells = subsets * n;

    // out_mask[k] has bit v set iff the forward edge k → v exists.
    let out_mask: Vec<u64> = (0..n)
        .map(|k| {
            graph
                .neighbors_out(k)
                .iter()
                .fold(0u64, |mask, &v| mask | (1u64 << v))
        })
        .collect();

    debug!(cells, "allocating hamiltonian dp table");
    let mut dp = allocate_table(cells, UNREACHED)?;
    let mut prev = allocate_table(cells, NO_PREDECESSOR)?;
    let at = |mask: usize, v: usize| mask * n + v;

    for v in 0..n {
        dp[at(1 << v, v)] = 0;
    }

    // Subsets in increasing numeric order: every `mask ^ (1 << v)` is smaller
    // than `mask`, so its row is already final.
    for mask in 1..subsets {
        for v in (0..n).filter(|&v| mask & (1 << v) != 0) {
            let rest = mask ^ (1 << v);
            if rest == 0 {
                continue;
            }
            let mut best = UNREACHED;
            let mut best_prev = NO_PREDECESSOR;
            for k in (0..n).filter(|&k| rest & (1 << k) != 0) {
                let base = dp[at(rest, k)];
                if base == UNREACHED {
                    continue;
                }
                let step = base + u8::from(out_mask[k] & (1u64 << v) == 0);
                if step < best {
                    best = step;
                    best_prev = k as u8;
                }
            }
            dp[at(mask, v)] = best;
            prev[at(mask, v)] = best_prev;
        }
    }

    let full = subsets - 1;
    let mut end = 0;
    for v in 1..n {
        if dp[at(full, v)] < dp[at(full, end)] {
            end = v;
        }
    }
    let missing = usize::from(dp[at(full, end)]);

    let mut order = Vec::with_capacity(n);
    let mut mask = full;
    let mut current = end;
    loop {
        order.push(current);
        let p = prev[at(mask, current)];
        mask ^= 1 << current;
        if p == NO_PREDECESSOR {
            break;
        }
        current = usize::from(p);
    }
    order.reverse();

    Ok((order, missing))
}

/// A `cells`-long table filled with `fill`, or an error if the allocator refuses.
fn allocate_table(cells: usize, fill: u8) -> Result<Vec<u8>> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(cells)
        .map_err(|_| GraphError::TableAllocation { cells })?;
    table.resize(cells, fill);
    Ok(table)
}
