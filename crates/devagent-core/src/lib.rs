//! Interaction log, projections and upload tree building for DevAgent.

mod agent;
mod chat;
mod db;
mod error;
mod interaction_log;
mod kv;
mod stats;
mod tree;
mod upload;

pub use agent::{run_task, Generator};
pub use chat::{exchanges, reconstruct, ChatSession, GENERATION_APOLOGY};
pub use db::SqliteStore;
pub use error::DevAgentError;
pub use interaction_log::{InteractionLog, DEFAULT_HISTORY_LIMIT, DEFAULT_STORAGE_KEY};
pub use kv::{KeyValueStore, MemoryStore};
pub use stats::stats;
pub use tree::{build, PathTreeBuilder};
pub use upload::{
    build_upload, read_or_placeholder, DirectoryUpload, FsEntry, UploadEntry, READ_ERROR_PLACEHOLDER,
};

/// Result type for DevAgent operations.
pub type Result<T> = std::result::Result<T, DevAgentError>;
