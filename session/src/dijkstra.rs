use std::collections::BTreeMap;

use pathstep_core::{dijkstra, DijkstraOutcome, DijkstraRun, NodeId, Weight};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SessionError};
use crate::state::ActiveRun;
use crate::util::RunMode;
use crate::Session;

/// What a caller sees of the active Dijkstra run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DijkstraView {
    pub source: NodeId,
    pub mode: RunMode,
    pub distances: BTreeMap<NodeId, Weight>,
    pub visited: Vec<NodeId>,
    pub unvisited: Vec<NodeId>,
    /// Node acted on by the last applied step.
    pub current_node: Option<NodeId>,
    pub description: Option<String>,
    pub position: usize,
    pub len: usize,
    pub finished: bool,
    pub outcome: DijkstraOutcome,
    pub stale: bool,
}

impl DijkstraView {
    fn new(active: &ActiveRun<DijkstraRun>, generation: u64) -> Self {
        let run = &active.run;
        let state = run.current_state();
        Self {
            source: run.source().to_string(),
            mode: active.mode,
            distances: state.distances.clone(),
            visited: state.visited.iter().cloned().collect(),
            unvisited: state.unvisited.iter().cloned().collect(),
            current_node: run.current_node().map(str::to_string),
            description: run.last_step().map(|s| s.description.clone()),
            position: run.position(),
            len: run.len(),
            finished: run.is_finished(),
            outcome: run.outcome(),
            stale: active.is_stale(generation),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Session {
    /// Record a Dijkstra run from `source`. Returns `None` on an empty graph.
    ///
    /// A source that is not in the graph still starts a run; it has no steps
    /// and its outcome is `source_missing`.
    pub fn start_dijkstra(&mut self, source: &str, mode: RunMode) -> Result<Option<DijkstraView>> {
        if self.graph.is_empty() {
            return Ok(None);
        }

        let run = match mode {
            RunMode::Step => DijkstraRun::new(&self.graph, source),
            RunMode::Complete => DijkstraRun::complete(&self.graph, source),
        };
        debug!(source, ?mode, steps = run.len(), "dijkstra run started");

        let active = ActiveRun::new(run, mode, self.generation);
        let view = DijkstraView::new(&active, self.generation);
        self.dijkstra = Some(active);
        Ok(Some(view))
    }

    /// Apply one step. Returns `None` once the run is finished.
    pub fn next_dijkstra_step(&mut self) -> Result<Option<DijkstraView>> {
        self.ensure_fresh();
        let generation = self.generation;
        let active = self
            .dijkstra
            .as_mut()
            .ok_or(SessionError::NoActiveRun("dijkstra"))?;

        if active.run.next_step().is_none() {
            return Ok(None);
        }
        Ok(Some(DijkstraView::new(active, generation)))
    }

    pub fn dijkstra_view(&mut self) -> Result<DijkstraView> {
        self.ensure_fresh();
        let active = self
            .dijkstra
            .as_ref()
            .ok_or(SessionError::NoActiveRun("dijkstra"))?;
        Ok(DijkstraView::new(active, self.generation))
    }

    /// One shortest path `source -> target` on the current graph.
    pub fn shortest_path(&self, source: &str, target: &str) -> Option<Vec<NodeId>> {
        dijkstra::shortest_path(&self.graph, source, target)
    }
}
