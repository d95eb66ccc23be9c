//! pathstep-session: Stateful step-through layer over pathstep-core.
//!
//! Owns the mutable graph, the active Dijkstra and Floyd-Warshall runs, and
//! the session configuration. Views serialize to JSON for whatever front end
//! drives the session. Every graph mutation bumps a generation counter so
//! runs derived from an older graph are never served silently.

use pathstep_core::{DijkstraRun, FloydWarshallRun, Graph};
use tracing::info;

mod all_pairs;
mod config;
mod dijkstra;
mod error;
mod floyd;
mod generation;
mod load;
mod state;
mod status;
mod util;

pub use config::SessionConfig;
pub use dijkstra::DijkstraView;
pub use error::{Result, SessionError};
pub use floyd::FloydView;
pub use load::LoadSummary;
pub use status::{RunStatus, SessionStatus};
pub use util::{parse_algorithm, parse_mode, RunMode};

use state::ActiveRun;

/// One user's graph plus the runs derived from it.
pub struct Session {
    graph: Graph,
    generation: u64,
    config: SessionConfig,
    dijkstra: Option<ActiveRun<DijkstraRun>>,
    floyd: Option<ActiveRun<FloydWarshallRun>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            graph: Graph::new(),
            generation: 0,
            config,
            dijkstra: None,
            floyd: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current graph generation; 0 until the first mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Discard both stepping runs. The graph is kept.
    pub fn reset(&mut self) {
        if self.dijkstra.is_some() || self.floyd.is_some() {
            info!("discarding active runs");
        }
        self.dijkstra = None;
        self.floyd = None;
    }
}

#[cfg(test)]
mod tests {
    use pathstep_core::{AllPairsAlgorithm, DijkstraOutcome, INF};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_reset_discards_runs() {
        let mut session = Session::new();
        session
            .load_graph(Graph::from_edges(vec![("A", "B", 1)]))
            .unwrap();
        session.start_dijkstra("A", RunMode::Step).unwrap();
        session.start_floyd_warshall(RunMode::Step).unwrap();

        session.reset();
        assert!(matches!(
            session.dijkstra_view(),
            Err(SessionError::NoActiveRun(_))
        ));
        assert!(matches!(
            session.floyd_view(),
            Err(SessionError::NoActiveRun(_))
        ));
        assert_eq!(session.graph().node_count(), 2);
    }

    #[test]
    fn test_edit_then_rerun() {
        let mut session = Session::new();
        session
            .load_graph(Graph::from_edges(vec![("A", "B", 4), ("B", "C", 2), ("A", "C", 10)]))
            .unwrap();
        let before = session
            .start_dijkstra("A", parse_mode("complete").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(before.distances["C"], 6);

        session.remove_edge("B", "C");
        let after = session
            .start_dijkstra("A", RunMode::Complete)
            .unwrap()
            .unwrap();
        assert_eq!(after.distances["C"], 10);
        assert!(!after.stale);
    }

    #[test]
    fn test_unreachable_nodes_stay_inf() {
        let mut session = Session::new();
        session
            .load_json(r#"{"nodes": ["A", "B"], "edges": []}"#)
            .unwrap();

        let view = session
            .start_dijkstra("A", RunMode::Complete)
            .unwrap()
            .unwrap();
        assert_eq!(view.distances["B"], INF);
        assert_eq!(view.outcome, DijkstraOutcome::Unreachable { remaining: 1 });

        let algorithm = parse_algorithm("faster-apsp").unwrap();
        let result = session.run_all_pairs(algorithm).unwrap().unwrap();
        assert_eq!(result.matrix.rows(), vec![vec![0, INF], vec![INF, 0]]);
        assert_eq!(
            result,
            session
                .run_all_pairs(AllPairsAlgorithm::SlowApsp)
                .unwrap()
                .unwrap()
        );
    }
}
