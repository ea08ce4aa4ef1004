//! Uploaded project folders.
//!
//! An upload is a flat batch of entries, each with a relative path whose
//! first segment is the uploaded folder's name. Contents are read lazily.

use crate::tree::build;
use crate::{DevAgentError, Result};
use devagent_types::FileTreeNode;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Shown in place of a file's contents when it cannot be read.
pub const READ_ERROR_PLACEHOLDER: &str = "Error reading file.";

/// One uploaded file.
pub trait UploadEntry {
    /// `/`-separated path relative to the upload, including the folder name.
    fn relative_path(&self) -> &str;

    /// Read the file's text.
    fn read(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Read an entry, substituting [`READ_ERROR_PLACEHOLDER`] on failure.
pub async fn read_or_placeholder<E: UploadEntry>(entry: &E) -> String {
    match entry.read().await {
        Ok(text) => text,
        Err(e) => {
            warn!(target: "devagent::tree", "Failed to read {}: {}", entry.relative_path(), e);
            READ_ERROR_PLACEHOLDER.to_string()
        }
    }
}

/// A file on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    relative_path: String,
    absolute_path: PathBuf,
}

impl FsEntry {
    pub fn new(relative_path: impl Into<String>, absolute_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
            absolute_path: absolute_path.into(),
        }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }
}

impl UploadEntry for FsEntry {
    fn relative_path(&self) -> &str {
        &self.relative_path
    }

    fn read(&self) -> impl Future<Output = Result<String>> + Send {
        let path = self.absolute_path.clone();
        async move {
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| DevAgentError::FileRead { path, source })
        }
    }
}

/// A directory uploaded as a whole.
pub struct DirectoryUpload;

impl DirectoryUpload {
    /// Collect every non-hidden file under `root`, sorted by relative path.
    ///
    /// Relative paths start with the directory's own name, as a browser
    /// folder upload would report them.
    pub async fn scan(root: &Path) -> Result<Vec<FsEntry>> {
        let root = tokio::fs::canonicalize(root).await?;
        let prefix = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut entries = Vec::new();
        let mut pending = vec![(root.clone(), prefix)];

        while let Some((dir, rel)) = pending.pop() {
            let mut reader = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = reader.next_entry().await? {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') {
                    continue;
                }

                let child_rel = if rel.is_empty() {
                    name
                } else {
                    format!("{}/{}", rel, name)
                };

                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push((entry.path(), child_rel));
                } else if file_type.is_file() {
                    entries.push(FsEntry::new(child_rel, entry.path()));
                }
            }
        }

        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        debug!(target: "devagent::tree", "Scanned {} file(s) under {}", entries.len(), root.display());
        Ok(entries)
    }
}

/// Build the tree for one upload batch, in the batch's order.
pub fn build_upload<E: UploadEntry>(entries: Vec<E>) -> FileTreeNode<E> {
    build(
        entries
            .into_iter()
            .map(|entry| (entry.relative_path().to_string(), entry)),
    )
}
