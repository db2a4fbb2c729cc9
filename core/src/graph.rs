use tracing::trace;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::registry::{LabelRegistry, VertexId};
use crate::{centers, hamiltonian, scc, traversal};

/// In-memory directed page graph: label registry + forward and transpose adjacency.
///
/// Adjacency is stored both ways: `forward[a]` lists targets of edges
/// leaving a, `transpose[b]` lists sources of edges entering b. Both grow in
/// lockstep with the registry and every `add_edge` writes to both.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    registry: LabelRegistry,
    forward: Vec<Vec<VertexId>>,
    transpose: Vec<Vec<VertexId>>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            registry: LabelRegistry::with_capacity(vertex_count),
            forward: Vec::with_capacity(vertex_count),
            transpose: Vec::with_capacity(vertex_count),
            edge_count: 0,
        }
    }

    /// Register a vertex, returning its index. Repeated labels keep their index.
    pub fn add_vertex(&mut self, label: &str) -> VertexId {
        let (id, created) = self.registry.intern(label);
        if created {
            self.forward.push(Vec::new());
            self.transpose.push(Vec::new());
            trace!(id, label, "vertex added");
        }
        id
    }

    /// Add a directed edge, creating either endpoint if needed.
    ///
    /// Parallel edges and self-loops are kept as-is.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from_id = self.add_vertex(from);
        let to_id = self.add_vertex(to);
        self.forward[from_id].push(to_id);
        self.transpose[to_id].push(from_id);
        self.edge_count += 1;
    }

    /// Bulk load from an iterator of (from, to) label pairs.
    pub fn load_edges<I, S>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        for (from, to) in edges {
            self.add_edge(from.as_ref(), to.as_ref());
        }
    }

    pub fn index_of(&self, label: &str) -> Option<VertexId> {
        self.registry.index_of(label)
    }

    pub fn label_of(&self, id: VertexId) -> Option<&str> {
        self.registry.label_of(id)
    }

    /// Labels in vertex-index order.
    pub fn labels(&self) -> impl ExactSizeIterator<Item = &str> {
        self.registry.labels()
    }

    pub(crate) fn labels_for(&self, ids: &[VertexId]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| self.registry.label_of(id))
            .map(str::to_string)
            .collect()
    }

    /// Outgoing neighbors of `id`, in edge insertion order.
    pub fn neighbors_out(&self, id: VertexId) -> &[VertexId] {
        self.forward.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Incoming neighbors of `id` (the transpose adjacency).
    pub fn neighbors_in(&self, id: VertexId) -> &[VertexId] {
        self.transpose.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn forward(&self) -> &[Vec<VertexId>] {
        &self.forward
    }

    pub(crate) fn transpose(&self) -> &[Vec<VertexId>] {
        &self.transpose
    }

    pub fn contains_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.neighbors_out(from).contains(&to)
    }

    pub fn vertex_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of edges added, parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let labels: usize = self.registry.labels().map(|l| l.len() * 2).sum();
        let registry = self.vertex_count() * (2 * size_of::<String>() + size_of::<VertexId>() + 16);
        let lists = self.vertex_count() * 2 * size_of::<Vec<VertexId>>();
        let edges = self.edge_count * 2 * size_of::<VertexId>();

        labels + registry + lists + edges
    }

    // --- Analysis queries ---

    /// Minimum number of edges from `from` to `to`; `None` if unreachable or unknown.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<u32> {
        traversal::shortest_path(self, from, to)
    }

    /// Labels along one shortest path from `from` to `to`, endpoints included.
    pub fn shortest_route(&self, from: &str, to: &str) -> Option<Vec<String>> {
        traversal::shortest_route(self, from, to)
    }

    /// Labels of every minimum-eccentricity vertex, in vertex-index order.
    pub fn centers(&self) -> Vec<String> {
        centers::centers(self)
    }

    /// Strongly connected components in Kosaraju order.
    pub fn strongly_connected_components(&self) -> Vec<Vec<String>> {
        scc::strongly_connected_components(self)
    }

    /// Hamiltonian path using the default [`AnalysisConfig`].
    pub fn hamiltonian_path(&self) -> Result<Option<Vec<String>>> {
        self.hamiltonian_path_with(&AnalysisConfig::default())
    }

    pub fn hamiltonian_path_with(&self, config: &AnalysisConfig) -> Result<Option<Vec<String>>> {
        hamiltonian::hamiltonian_path(self, config)
    }
}

impl<S: AsRef<str>> FromIterator<(S, S)> for Graph {
    fn from_iter<I: IntoIterator<Item = (S, S)>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.load_edges(iter);
        graph
    }
}

impl<S: AsRef<str>> Extend<(S, S)> for Graph {
    fn extend<I: IntoIterator<Item = (S, S)>>(&mut self, iter: I) {
        self.load_edges(iter);
    }
}
