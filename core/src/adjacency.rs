use std::collections::HashMap;

use crate::graph::{Graph, NodeId, Weight};

/// Outgoing `(neighbor, weight)` lists for every node, built on demand from a [`Graph`].
///
/// Every node gets an entry, isolated ones included, since single-source
/// algorithms treat the whole node set as visit candidates. Within a node's
/// list, edges keep insertion order and parallel edges stay separate entries.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    outgoing: HashMap<NodeId, Vec<(NodeId, Weight)>>,
}

impl AdjacencyIndex {
    pub fn build(graph: &Graph) -> Self {
        let mut outgoing: HashMap<NodeId, Vec<(NodeId, Weight)>> = graph
            .nodes()
            .iter()
            .map(|id| (id.clone(), Vec::new()))
            .collect();

        for edge in graph.edges() {
            if !outgoing.contains_key(&edge.to) {
                continue;
            }
            if let Some(list) = outgoing.get_mut(&edge.from) {
                list.push((edge.to.clone(), edge.weight));
            }
        }

        Self { outgoing }
    }

    /// Outgoing neighbors of `id`; empty for unknown or isolated nodes.
    pub fn neighbors(&self, id: &str) -> &[(NodeId, Weight)] {
        self.outgoing.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.outgoing.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(|v| v.len()).sum()
    }

    /// Node ids in lexicographic order.
    pub fn sorted_nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.outgoing.keys().cloned().collect();
        nodes.sort();
        nodes
    }
}
