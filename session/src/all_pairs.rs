use std::time::Instant;

use pathstep_core::{AllPairs, AllPairsAlgorithm};
use tracing::debug;

use crate::error::{Result, SessionError};
use crate::Session;

impl Session {
    /// Final all-pairs matrix and node order. Returns `None` on an empty graph.
    pub fn run_all_pairs(&self, algorithm: AllPairsAlgorithm) -> Result<Option<AllPairs>> {
        let nodes = self.graph.node_count();
        if nodes == 0 {
            return Ok(None);
        }

        let max = self.config.slow_apsp_max_nodes;
        if algorithm == AllPairsAlgorithm::SlowApsp && nodes > max {
            return Err(SessionError::AlgorithmTooCostly {
                algorithm: algorithm.name(),
                nodes,
                max,
            });
        }

        let start = Instant::now();
        let result = algorithm.run(&self.graph);
        debug!(
            %algorithm,
            nodes,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "all-pairs run complete"
        );
        Ok(Some(result))
    }
}
