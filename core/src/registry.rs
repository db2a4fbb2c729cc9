use std::collections::HashMap;

/// Dense vertex index. Assigned in first-insertion order, never reused.
pub type VertexId = usize;

/// Bidirectional label <-> index mapping.
///
/// `labels[i]` is the label of vertex `i`; `index` maps each label back to
/// its position. Both sides grow together and nothing is ever removed, so
/// `index_of(label_of(i)) == Some(i)` holds for every assigned index.
#[derive(Debug, Clone, Default)]
pub struct LabelRegistry {
    index: HashMap<String, VertexId>,
    labels: Vec<String>,
}

impl LabelRegistry {
    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            index: HashMap::with_capacity(vertex_count),
            labels: Vec::with_capacity(vertex_count),
        }
    }

    /// Return the index for `label`, assigning the next one if unseen.
    ///
    /// The bool is true when a new index was assigned.
    pub fn intern(&mut self, label: &str) -> (VertexId, bool) {
        if let Some(&id) = self.index.get(label) {
            return (id, false);
        }
        let id = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        (id, true)
    }

    pub fn index_of(&self, label: &str) -> Option<VertexId> {
        self.index.get(label).copied()
    }

    pub fn label_of(&self, id: VertexId) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Labels in index order.
    pub fn labels(&self) -> impl ExactSizeIterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
