use crate::graph::NodeId;

/// Structural problems in a [`Graph`](crate::Graph).
///
/// The engines never return these: an edge with an unknown endpoint is simply
/// never indexed. They exist for callers that want to reject such input up front.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("edge {from} -> {to} references unknown node '{missing}'")]
    UnknownEndpoint {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },
}

pub type Result<T> = std::result::Result<T, GraphError>;
