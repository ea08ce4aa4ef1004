//! Error types for DevAgent.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevAgentError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
