use serde::Serialize;

use crate::state::ActiveRun;
use crate::util::RunMode;
use crate::Session;

/// Progress of one stepping run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStatus {
    pub mode: RunMode,
    pub position: usize,
    pub len: usize,
    pub finished: bool,
    pub computed_generation: u64,
    pub stale: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    /// "empty" or "loaded".
    pub status: &'static str,
    pub node_count: usize,
    pub edge_count: usize,
    pub generation: u64,
    pub dijkstra: Option<RunStatus>,
    pub floyd_warshall: Option<RunStatus>,
}

impl RunStatus {
    fn new<R>(active: &ActiveRun<R>, position: usize, len: usize, current: u64) -> Self {
        Self {
            mode: active.mode,
            position,
            len,
            finished: position == len,
            computed_generation: active.generation,
            stale: active.is_stale(current),
        }
    }
}

impl Session {
    /// Snapshot of the graph and active runs. Stale runs are reported, not discarded.
    pub fn status(&self) -> SessionStatus {
        let current = self.generation;
        SessionStatus {
            status: if self.graph.is_empty() { "empty" } else { "loaded" },
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            generation: current,
            dijkstra: self
                .dijkstra
                .as_ref()
                .map(|a| RunStatus::new(a, a.run.position(), a.run.len(), current)),
            floyd_warshall: self
                .floyd
                .as_ref()
                .map(|a| RunStatus::new(a, a.run.position(), a.run.len(), current)),
        }
    }
}
