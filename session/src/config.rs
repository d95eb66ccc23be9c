//! Session limits and behavior, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Upper bound on the node count accepted by loads and `add_node`.
    pub max_nodes: usize,
    /// Upper bound for the `O(V⁴)` bounded-round min-plus engine.
    pub slow_apsp_max_nodes: usize,
    /// Discard runs computed against an older graph generation before serving them.
    pub auto_reset: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_nodes: 512,
            slow_apsp_max_nodes: 128,
            auto_reset: true,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SessionError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| SessionError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
