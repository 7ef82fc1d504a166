//! Error types for the shape model.
//!
//! Errors fall into two classes. User errors carry a message meant for the
//! person editing the shape; the operation did not happen and the model is
//! unchanged. Everything else is an internal consistency error raised when a
//! caller breaks the model's contract, e.g. by holding a stale vertex id.

use crate::vertex::{Direction, VertexId, VertexPart};
use thiserror::Error;

/// Smallest number of vertices a drawing may have.
pub const MIN_VERTICES: usize = 3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Deleting would leave fewer than [`MIN_VERTICES`] vertices.
    #[error("Can't delete. The shape must have at least {min} vertices.")]
    TooFewVertices { min: usize },

    /// The vertex has no control point on the requested side.
    #[error("No {direction} control point to delete.")]
    MissingControlPoint { id: VertexId, direction: Direction },

    #[error("Vertex with id \"{0}\" not found")]
    VertexNotFound(VertexId),

    #[error("Position \"{part}\" not found in vertex \"{id}\"")]
    MissingPart { id: VertexId, part: VertexPart },

    #[error("Index {index} out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("A drawing needs at least {min} vertices, got {count}")]
    InvalidVertexCount { count: usize, min: usize },

    #[error("Duplicate vertex id \"{0}\"")]
    DuplicateVertex(VertexId),

    #[error("Parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ShapeError {
    /// Whether the error should be shown to the end user rather than treated
    /// as a programming mistake.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ShapeError::TooFewVertices { .. } | ShapeError::MissingControlPoint { .. }
        )
    }

    pub fn user_message(&self) -> Option<String> {
        self.is_user_error().then(|| self.to_string())
    }

    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        ShapeError::Parse {
            offset,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ShapeError {
    fn from(e: serde_json::Error) -> Self {
        ShapeError::Snapshot(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShapeError>;
