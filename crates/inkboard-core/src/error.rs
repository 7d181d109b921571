//! Error types.

use thiserror::Error;

/// A shape record that does not describe a valid shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("Shape record has no id")]
    MissingId,
    #[error("Shape {0} has no type")]
    MissingKind(String),
    #[error("Shape {id} has unknown type `{kind}`")]
    UnknownKind { id: String, kind: String },
    #[error("Shape {id} ({kind}) is missing `{field}`")]
    MissingField {
        id: String,
        kind: &'static str,
        field: &'static str,
    },
    #[error("Shape {0} has an empty pencil path")]
    EmptyPath(String),
}

/// Page management errors.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Page not found: {0}")]
    PageNotFound(String),
    #[error("Cannot delete the last page")]
    LastPage,
    #[error("Invalid page JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for page operations.
pub type BoardResult<T> = Result<T, BoardError>;
