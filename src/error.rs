//! Error types for model parsing.

use thiserror::Error;

/// Result type alias using ModelError.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Main error type for model parsing and UV resolution.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Failed to parse JSON text.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading a model file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The top-level document is not an object with an `elements` array.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// An element is missing its corners or has the wrong shape.
    #[error("Malformed element at {path}: {reason}")]
    MalformedElement { path: String, reason: String },

    /// An element's rotation block could not be read.
    #[error("Malformed rotation at {path}: {reason}")]
    MalformedRotation { path: String, reason: String },

    /// A face has a bad direction, cullface or texture reference.
    #[error("Malformed face at {path}: {reason}")]
    MalformedFace { path: String, reason: String },

    /// Text did not name one of the six directions.
    #[error("Unknown direction: {0:?}")]
    UnknownDirection(String),

    /// Text did not name one of the three axes.
    #[error("Unknown axis: {0:?}")]
    UnknownAxis(String),

    /// Atlas dimensions cannot be used for UV resolution.
    #[error("Invalid atlas: {0}")]
    InvalidAtlas(String),

    /// A face references a texture the atlas does not contain.
    #[error("Unresolved texture reference: {0}")]
    UnresolvedTexture(String),
}

impl ModelError {
    /// The field path of a malformed-input error, if it carries one.
    pub fn path(&self) -> Option<&str> {
        match self {
            ModelError::MalformedElement { path, .. }
            | ModelError::MalformedRotation { path, .. }
            | ModelError::MalformedFace { path, .. } => Some(path),
            _ => None,
        }
    }
}
