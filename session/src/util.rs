use pathstep_core::AllPairsAlgorithm;
use serde::Serialize;

use crate::error::{Result, SessionError};

/// How a stepping run is exposed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Start at the initial state and advance one step per call.
    Step,
    /// Compute everything and expose only the terminal state.
    Complete,
}

/// Parse a run mode string.
///
/// Accepts: "step", "complete" (case-insensitive), plus "full" / "all".
pub fn parse_mode(s: &str) -> Result<RunMode> {
    match s.trim().to_lowercase().as_str() {
        "step" | "steps" => Ok(RunMode::Step),
        "complete" | "full" | "all" => Ok(RunMode::Complete),
        _ => Err(SessionError::InvalidArgument {
            name: "mode",
            value: s.to_string(),
            expected: "'step' or 'complete'",
        }),
    }
}

/// Parse an all-pairs algorithm name, accepting the aliases the core parser knows.
pub fn parse_algorithm(s: &str) -> Result<AllPairsAlgorithm> {
    s.trim()
        .parse()
        .map_err(|_| SessionError::InvalidArgument {
            name: "algorithm",
            value: s.to_string(),
            expected: "'floyd-warshall', 'johnson', 'slow-apsp' or 'faster-apsp'",
        })
}
