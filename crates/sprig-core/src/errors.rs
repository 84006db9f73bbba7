//! Error types for loading scene graphs.

use thiserror::Error;

/// Errors raised while reading a host export.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Malformed scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene document: {0}")]
    InvalidDocument(String),
}
