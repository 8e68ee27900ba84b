use thiserror::Error;

use crate::{EdgeId, VertexId};

/// Errors raised by graph model operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {0} does not exist in this graph")]
    UnknownVertex(VertexId),

    #[error("edge {0} does not exist in this graph")]
    UnknownEdge(EdgeId),

    #[error("self-loop on vertex {0} is not allowed by the graph policy")]
    SelfLoop(VertexId),

    #[error("vertex {0} is already present")]
    DuplicateVertex(VertexId),

    #[error("edge {0} is already present")]
    DuplicateEdge(EdgeId),

    #[error("vertex {vertex} is not an endpoint of edge {edge}")]
    NotAnEndpoint { edge: EdgeId, vertex: VertexId },
}

/// Errors raised while resolving requirement choices into graph elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequirementError {
    #[error("expected {expected} choices, got {got}")]
    ChoiceCount { expected: usize, got: usize },

    #[error("choice {choice} for requirement `{name}` is out of range (0..{options})")]
    ChoiceOutOfRange {
        name: String,
        choice: usize,
        options: usize,
    },
}
