use std::time::Instant;

use pathstep_core::{Edge, Graph, NodeId, Weight};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SessionError};
use crate::Session;

/// Counts reported after a load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub generation: u64,
    pub load_time_ms: f64,
}

/// JSON shape accepted by [`Session::load_json`].
///
/// Nodes listed explicitly are kept even when isolated; edge endpoints that
/// are not listed are created.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GraphInput {
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
}

impl Session {
    /// Replace the session graph. Active runs become stale.
    pub fn load_graph(&mut self, graph: Graph) -> Result<LoadSummary> {
        let start = Instant::now();
        self.check_node_limit(graph.node_count())?;

        self.graph = graph;
        let generation = self.invalidate();

        let summary = LoadSummary {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            generation,
            load_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        info!(
            nodes = summary.node_count,
            edges = summary.edge_count,
            generation,
            "graph loaded"
        );
        Ok(summary)
    }

    /// Load a graph from `{"nodes": [...], "edges": [{"from", "to", "weight"}]}`.
    pub fn load_json(&mut self, json: &str) -> Result<LoadSummary> {
        let input: GraphInput = serde_json::from_str(json)?;
        let mut graph = Graph::with_capacity(input.nodes.len(), input.edges.len());
        for id in input.nodes {
            graph.add_node(id);
        }
        graph.load_edges(input.edges.into_iter().map(|e| (e.from, e.to, e.weight)));
        self.load_graph(graph)
    }

    /// Add a node. Returns false (and leaves the generation alone) for a duplicate.
    pub fn add_node(&mut self, id: &str) -> Result<bool> {
        if self.graph.has_node(id) {
            return Ok(false);
        }
        self.check_node_limit(self.graph.node_count() + 1)?;
        self.graph.add_node(id);
        self.invalidate();
        Ok(true)
    }

    /// Remove a node and its incident edges.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let removed = self.graph.remove_node(id);
        if removed {
            self.invalidate();
        }
        removed
    }

    /// Add a directed edge between existing nodes.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: Weight) -> Result<()> {
        self.graph.try_add_edge(from, to, weight)?;
        self.invalidate();
        Ok(())
    }

    /// Remove every edge `from -> to`. Returns how many were removed.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> usize {
        let removed = self.graph.remove_edge(from, to);
        if removed > 0 {
            self.invalidate();
        }
        removed
    }

    /// Drop every node and edge.
    pub fn clear(&mut self) {
        if self.graph.is_empty() && self.graph.edge_count() == 0 {
            return;
        }
        self.graph.clear();
        self.invalidate();
    }

    fn check_node_limit(&self, nodes: usize) -> Result<()> {
        let max = self.config.max_nodes;
        if nodes > max {
            return Err(SessionError::GraphTooLarge { nodes, max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pathstep_core::GraphError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::SessionConfig;

    #[test]
    fn test_load_graph_bumps_generation() {
        let mut session = Session::new();
        let summary = session
            .load_graph(Graph::from_edges(vec![("A", "B", 1), ("B", "C", 2)]))
            .unwrap();
        assert_eq!(summary.node_count, 3);
        assert_eq!(summary.edge_count, 2);
        assert_eq!(summary.generation, 1);
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_load_rejects_oversized_graph() {
        let mut session = Session::with_config(SessionConfig {
            max_nodes: 2,
            ..SessionConfig::default()
        });
        let err = session
            .load_graph(Graph::from_edges(vec![("A", "B", 1), ("B", "C", 2)]))
            .unwrap_err();
        assert!(matches!(err, SessionError::GraphTooLarge { nodes: 3, max: 2 }));
        assert!(session.graph().is_empty());
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_add_node_respects_limit() {
        let mut session = Session::with_config(SessionConfig {
            max_nodes: 1,
            ..SessionConfig::default()
        });
        assert!(session.add_node("A").unwrap());
        assert!(!session.add_node("A").unwrap());
        assert!(matches!(
            session.add_node("B"),
            Err(SessionError::GraphTooLarge { nodes: 2, max: 1 })
        ));
    }

    #[test]
    fn test_load_json() {
        let mut session = Session::new();
        let summary = session
            .load_json(
                r#"{
                    "nodes": ["Z"],
                    "edges": [
                        {"from": "A", "to": "B", "weight": 4},
                        {"from": "B", "to": "C", "weight": 2}
                    ]
                }"#,
            )
            .unwrap();
        assert_eq!(summary.node_count, 4);
        assert_eq!(session.graph().sorted_nodes(), vec!["A", "B", "C", "Z"]);
    }

    #[test]
    fn test_load_json_rejects_malformed_input() {
        let mut session = Session::new();
        let err = session.load_json("{\"edges\": [{\"from\": \"A\"}]}").unwrap_err();
        assert!(matches!(err, SessionError::Json(_)));
    }

    #[test]
    fn test_add_edge_requires_endpoints() {
        let mut session = Session::new();
        session.add_node("A").unwrap();
        let err = session.add_edge("A", "B", 3).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Graph(GraphError::UnknownEndpoint { .. })
        ));
        assert_eq!(session.graph().edge_count(), 0);
    }

    #[test]
    fn test_edit_operations() {
        let mut session = Session::new();
        session.add_node("A").unwrap();
        session.add_node("B").unwrap();
        session.add_edge("A", "B", 3).unwrap();
        session.add_edge("A", "B", 5).unwrap();
        let generation = session.generation();

        assert_eq!(session.remove_edge("A", "B"), 2);
        assert_eq!(session.remove_edge("A", "B"), 0);
        assert!(session.remove_node("B"));
        assert!(!session.remove_node("B"));
        assert_eq!(session.generation(), generation + 2);

        session.clear();
        assert!(session.graph().is_empty());
    }
}
