//! Graph centers: vertices of minimum eccentricity.
//!
//! Eccentricity here is taken over *reachable* vertices only. Unreachable
//! pairs are ignored rather than treated as infinite, so a sink or isolated
//! vertex has eccentricity 0 and will be a center of any graph containing it.
//! On disconnected graphs the result can therefore look surprising; callers
//! that want connectivity-aware centers should filter by SCC first.

use tracing::{debug, instrument, trace};

use crate::graph::Graph;
use crate::registry::VertexId;
use crate::traversal::bfs_distances;

/// Largest BFS distance from `v` to any vertex it reaches (0 if none).
pub fn eccentricity(graph: &Graph, v: VertexId) -> u32 {
    bfs_distances(graph, v)
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0)
}

/// Eccentricity of every vertex, indexed by vertex. One BFS per vertex.
pub fn eccentricities(graph: &Graph) -> Vec<u32> {
    (0..graph.vertex_count())
        .map(|v| eccentricity(graph, v))
        .collect()
}

/// Labels of all vertices whose eccentricity equals the global minimum.
///
/// Ties are all included, in vertex-index order. O(V * (V + E)).
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn centers(graph: &Graph) -> Vec<String> {
    let mut best: Option<u32> = None;
    let mut found: Vec<VertexId> = Vec::new();

    for v in 0..graph.vertex_count() {
        let ecc = eccentricity(graph, v);
        trace!(vertex = v, eccentricity = ecc);
        match best {
            Some(min) if ecc > min => {}
            Some(min) if ecc == min => found.push(v),
            _ => {
                best = Some(ecc);
                found.clear();
                found.push(v);
            }
        }
    }

    debug!(min_eccentricity = ?best, centers = found.len(), "centers computed");
    graph.labels_for(&found)
}
