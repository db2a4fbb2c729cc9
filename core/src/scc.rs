//! Strongly connected components (Kosaraju).
//!
//! Pass 1 runs DFS over the forward graph from every unvisited vertex in
//! index order and records vertices in post-order. Pass 2 walks that order
//! backwards and runs DFS over the transpose graph from each vertex not yet
//! assigned; everything it reaches is one component.
//!
//! Output order is the order representatives come off the finish stack, and
//! within a component the transpose DFS pre-order from the representative.

use tracing::{debug, instrument};

use crate::graph::Graph;
use crate::registry::VertexId;
use crate::traversal::depth_first;

/// Vertices in forward-DFS post-order (the finish stack, bottom first).
pub fn finish_order(graph: &Graph) -> Vec<VertexId> {
    let n = graph.vertex_count();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    for v in 0..n {
        depth_first(graph.forward(), v, &mut visited, |_| {}, |u| order.push(u));
    }

    order
}

/// Components as vertex indices, in Kosaraju output order.
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn component_indices(graph: &Graph) -> Vec<Vec<VertexId>> {
    let order = finish_order(graph);
    let mut visited = vec![false; graph.vertex_count()];
    let mut components: Vec<Vec<VertexId>> = Vec::new();

    for &v in order.iter().rev() {
        if visited[v] {
            continue;
        }
        let mut component = Vec::new();
        depth_first(graph.transpose(), v, &mut visited, |u| component.push(u), |_| {});
        components.push(component);
    }

    debug!(components = components.len(), "strongly connected components computed");
    components
}

/// Components as labels, in Kosaraju output order.
pub fn strongly_connected_components(graph: &Graph) -> Vec<Vec<String>> {
    component_indices(graph)
        .iter()
        .map(|component| graph.labels_for(component))
        .collect()
}
