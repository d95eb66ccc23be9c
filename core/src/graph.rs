use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Opaque node identifier. Algorithms order nodes lexicographically by this value.
pub type NodeId = String;

/// Edge weight and path distance.
pub type Weight = i64;

/// Sentinel distance for "no path". A plain finite value so matrices stay numeric.
pub const INF: Weight = 999_999;

/// Add two distances, saturating at [`INF`].
///
/// Any operand at or above `INF` yields `INF`, so `INF + w` and `INF + INF`
/// never wrap and never look like a real distance.
#[inline]
pub fn dist_add(a: Weight, b: Weight) -> Weight {
    if a >= INF || b >= INF {
        return INF;
    }
    a.saturating_add(b).min(INF)
}

/// Render a distance for descriptions: `inf` for the sentinel, the number otherwise.
pub fn format_distance(d: Weight) -> String {
    if d >= INF {
        "inf".to_string()
    } else {
        d.to_string()
    }
}

/// A directed weighted edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, weight: Weight) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

/// Node set plus directed edge list.
///
/// Pure data: editing collaborators mutate it between runs, and every engine
/// derives its own index or matrix from a borrowed snapshot. Parallel edges are
/// allowed; edges whose endpoints are not in the node set are kept in the list
/// but never indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    nodes: Vec<NodeId>,
    #[serde(skip)]
    node_index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_count),
            node_index: HashMap::with_capacity(node_count),
            edges: Vec::with_capacity(edge_count),
        }
    }

    /// Register a node. Returns false if it was already present.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> bool {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return false;
        }
        self.node_index.insert(id.clone(), self.nodes.len());
        self.nodes.push(id);
        true
    }

    /// Remove a node and every edge touching it. Returns false if it was absent.
    pub fn remove_node(&mut self, id: &str) -> bool {
        if self.node_index.remove(id).is_none() {
            return false;
        }
        self.nodes.retain(|n| n != id);
        self.rebuild_index();
        self.edges.retain(|e| e.from != id && e.to != id);
        true
    }

    /// Append a directed edge. Endpoints are not created.
    pub fn add_edge(&mut self, from: impl Into<NodeId>, to: impl Into<NodeId>, weight: Weight) {
        self.edges.push(Edge::new(from, to, weight));
    }

    /// Append a directed edge, rejecting unknown endpoints.
    pub fn try_add_edge(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        weight: Weight,
    ) -> Result<()> {
        let edge = Edge::new(from, to, weight);
        self.check_edge(&edge)?;
        self.edges.push(edge);
        Ok(())
    }

    /// Remove every edge `from -> to`. Returns how many were removed.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| !(e.from == from && e.to == to));
        before - self.edges.len()
    }

    /// Bulk load `(from, to, weight)` triples, creating missing endpoints.
    pub fn load_edges<I, S>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (S, S, Weight)>,
        S: Into<NodeId>,
    {
        for (from, to, weight) in edges {
            let from = from.into();
            let to = to.into();
            self.add_node(from.clone());
            self.add_node(to.clone());
            self.edges.push(Edge { from, to, weight });
        }
    }

    /// Build a graph from `(from, to, weight)` triples.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S, Weight)>,
        S: Into<NodeId>,
    {
        let mut graph = Self::new();
        graph.load_edges(edges);
        graph
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.node_index.clear();
        self.edges.clear();
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Nodes sorted lexicographically. Every matrix and every consumer indexes by this order.
    pub fn sorted_nodes(&self) -> Vec<NodeId> {
        let mut nodes = self.nodes.clone();
        nodes.sort();
        nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that every edge references known nodes.
    pub fn validate(&self) -> Result<()> {
        self.edges.iter().try_for_each(|e| self.check_edge(e))
    }

    fn check_edge(&self, edge: &Edge) -> Result<()> {
        for endpoint in [&edge.from, &edge.to] {
            if !self.has_node(endpoint) {
                return Err(GraphError::UnknownEndpoint {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.node_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist_add_saturates() {
        assert_eq!(dist_add(3, 4), 7);
        assert_eq!(dist_add(INF, 4), INF);
        assert_eq!(dist_add(4, INF), INF);
        assert_eq!(dist_add(INF, INF), INF);
        assert_eq!(dist_add(INF - 1, 10), INF);
        assert_eq!(dist_add(5, -2), 3);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(12), "12");
        assert_eq!(format_distance(INF), "inf");
    }

    #[test]
    fn test_add_node_ignores_duplicates() {
        let mut g = Graph::new();
        assert!(g.add_node("A"));
        assert!(!g.add_node("A"));
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn test_add_edge_does_not_create_endpoints() {
        let mut g = Graph::new();
        g.add_node("A");
        g.add_edge("A", "Z", 3);
        assert_eq!(g.edge_count(), 1);
        assert!(!g.has_node("Z"));
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_try_add_edge_rejects_unknown_endpoint() {
        let mut g = Graph::new();
        g.add_node("A");
        let err = g.try_add_edge("A", "B", 1).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownEndpoint {
                from: "A".into(),
                to: "B".into(),
                missing: "B".into(),
            }
        );
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_load_edges_creates_endpoints() {
        let g = Graph::from_edges(vec![("A", "B", 4), ("B", "C", 2)]);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut g = Graph::from_edges(vec![("A", "B", 1), ("B", "C", 1), ("C", "A", 1)]);
        assert!(g.remove_node("B"));
        assert!(!g.has_node("B"));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edges()[0], Edge::new("C", "A", 1));
        assert!(g.has_node("C"));
        assert!(!g.remove_node("B"));
    }

    #[test]
    fn test_remove_edge_removes_parallel_edges() {
        let mut g = Graph::from_edges(vec![("A", "B", 1), ("A", "B", 7), ("B", "A", 2)]);
        assert_eq!(g.remove_edge("A", "B"), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_sorted_nodes_is_lexicographic() {
        let mut g = Graph::new();
        for id in ["c", "A", "b", "B"] {
            g.add_node(id);
        }
        assert_eq!(g.sorted_nodes(), vec!["A", "B", "b", "c"]);
        assert_eq!(g.nodes(), ["c", "A", "b", "B"]);
    }

    #[test]
    fn test_clear() {
        let mut g = Graph::from_edges(vec![("A", "B", 1)]);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(!g.has_node("A"));
    }
}
