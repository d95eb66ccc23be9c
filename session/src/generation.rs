//! Generation-based invalidation of derived runs.
//!
//! Every graph mutation bumps a monotonic counter. Runs remember the value
//! they were computed against; before a run is served the session compares
//! the two and, with `auto_reset` on, discards anything stale. With
//! `auto_reset` off the stale run is served and flagged in its view.

use tracing::{debug, info};

use crate::Session;

impl Session {
    /// Bump the generation counter. Returns the new value.
    ///
    /// Mutations made through the session call this themselves; callers that
    /// change the graph behind the session's back can call it directly.
    pub fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        debug!(generation = self.generation, "graph generation bumped");
        self.generation
    }

    /// Drop runs computed against an older generation, if `auto_reset` is on.
    pub(crate) fn ensure_fresh(&mut self) {
        if !self.config.auto_reset {
            return;
        }
        let current = self.generation;

        if let Some(active) = &self.dijkstra {
            if active.is_stale(current) {
                info!(
                    run_generation = active.generation,
                    current, "discarding stale dijkstra run"
                );
                self.dijkstra = None;
            }
        }
        if let Some(active) = &self.floyd {
            if active.is_stale(current) {
                info!(
                    run_generation = active.generation,
                    current, "discarding stale floyd-warshall run"
                );
                self.floyd = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pathstep_core::Graph;

    use crate::config::SessionConfig;
    use crate::error::SessionError;
    use crate::util::RunMode;
    use crate::Session;

    fn loaded(config: SessionConfig) -> Session {
        let mut session = Session::with_config(config);
        session
            .load_graph(Graph::from_edges(vec![("A", "B", 4), ("B", "C", 2)]))
            .unwrap();
        session
    }

    #[test]
    fn test_invalidate_is_monotonic() {
        let mut session = Session::new();
        assert_eq!(session.generation(), 0);
        assert_eq!(session.invalidate(), 1);
        assert_eq!(session.invalidate(), 2);
    }

    #[test]
    fn test_auto_reset_discards_stale_runs() {
        let mut session = loaded(SessionConfig::default());
        session.start_dijkstra("A", RunMode::Step).unwrap();
        session.start_floyd_warshall(RunMode::Step).unwrap();

        session.add_node("D").unwrap();

        assert!(matches!(
            session.next_dijkstra_step(),
            Err(SessionError::NoActiveRun("dijkstra"))
        ));
        assert!(matches!(
            session.floyd_view(),
            Err(SessionError::NoActiveRun("floyd-warshall"))
        ));
    }

    #[test]
    fn test_stale_run_served_when_auto_reset_off() {
        let mut session = loaded(SessionConfig {
            auto_reset: false,
            ..SessionConfig::default()
        });
        session.start_dijkstra("A", RunMode::Complete).unwrap();
        session.invalidate();

        let view = session.dijkstra_view().unwrap();
        assert!(view.stale);
        assert_eq!(view.distances["C"], 6);
    }

    #[test]
    fn test_unchanged_graph_keeps_runs() {
        let mut session = loaded(SessionConfig::default());
        session.start_dijkstra("A", RunMode::Step).unwrap();
        // Duplicate node: nothing changes, no bump.
        assert!(!session.add_node("A").unwrap());
        assert!(session.dijkstra_view().is_ok());
    }
}
