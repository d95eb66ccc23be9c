use pathstep_core::{DistanceMatrix, FloydWarshallRun, NodeId};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SessionError};
use crate::state::ActiveRun;
use crate::util::RunMode;
use crate::Session;

/// What a caller sees of the active Floyd-Warshall run.
///
/// `k`, `i` and `j` are `-1` before the first relaxation and on checkpoint steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloydView {
    pub mode: RunMode,
    pub nodes: Vec<NodeId>,
    pub matrix: DistanceMatrix,
    pub k: i64,
    pub i: i64,
    pub j: i64,
    pub updated: bool,
    pub description: Option<String>,
    pub position: usize,
    pub len: usize,
    pub finished: bool,
    pub stale: bool,
}

impl FloydView {
    fn new(active: &ActiveRun<FloydWarshallRun>, generation: u64) -> Self {
        let run = &active.run;
        let step = run.last_step();
        let (k, i, j) = step.map_or((-1, -1, -1), |s| s.indices());
        Self {
            mode: active.mode,
            nodes: run.nodes().to_vec(),
            matrix: run.matrix().clone(),
            k,
            i,
            j,
            updated: step.is_some_and(|s| s.updated),
            description: step.map(|s| s.description.clone()),
            position: run.position(),
            len: run.len(),
            finished: run.is_finished(),
            stale: active.is_stale(generation),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Session {
    /// Record a Floyd-Warshall derivation. Returns `None` on an empty graph.
    pub fn start_floyd_warshall(&mut self, mode: RunMode) -> Result<Option<FloydView>> {
        if self.graph.is_empty() {
            return Ok(None);
        }

        let run = match mode {
            RunMode::Step => FloydWarshallRun::new(&self.graph),
            RunMode::Complete => FloydWarshallRun::complete(&self.graph),
        };
        debug!(?mode, nodes = run.nodes().len(), steps = run.len(), "floyd-warshall run started");

        let active = ActiveRun::new(run, mode, self.generation);
        let view = FloydView::new(&active, self.generation);
        self.floyd = Some(active);
        Ok(Some(view))
    }

    /// Apply one step. Returns `None` once the run is finished.
    pub fn next_floyd_step(&mut self) -> Result<Option<FloydView>> {
        self.ensure_fresh();
        let generation = self.generation;
        let active = self
            .floyd
            .as_mut()
            .ok_or(SessionError::NoActiveRun("floyd-warshall"))?;

        if active.run.next_step().is_none() {
            return Ok(None);
        }
        Ok(Some(FloydView::new(active, generation)))
    }

    pub fn floyd_view(&mut self) -> Result<FloydView> {
        self.ensure_fresh();
        let active = self
            .floyd
            .as_ref()
            .ok_or(SessionError::NoActiveRun("floyd-warshall"))?;
        Ok(FloydView::new(active, self.generation))
    }
}
