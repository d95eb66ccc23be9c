use pathstep_core::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no active {0} run, start one first")]
    NoActiveRun(&'static str),

    #[error("graph has {nodes} nodes, exceeds max_nodes={max}")]
    GraphTooLarge { nodes: usize, max: usize },

    #[error("{algorithm} is limited to {max} nodes, graph has {nodes}")]
    AlgorithmTooCostly {
        algorithm: &'static str,
        nodes: usize,
        max: usize,
    },

    #[error("invalid {name} '{value}': expected {expected}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
