//! Local persistence: the whole serialized resume in one JSON file.
//!
//! The file content is exactly the export form, so a store file and an
//! exported backup are interchangeable. Saves go through a sibling temp file
//! renamed into place, so a crash mid-write never truncates the only copy.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::resume::Resume;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Pluggable document store. The service only ever holds one resume, so the
/// interface is load-the-document / save-the-document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns `None` when no document has been saved yet. A present but
    /// unreadable document is an error, not an empty start.
    async fn load(&self) -> Result<Option<Resume>, StorageError>;

    async fn save(&self, resume: &Resume) -> Result<(), StorageError>;
}

/// File-backed store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn load(&self) -> Result<Option<Resume>, StorageError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let resume = serde_json::from_slice(&raw)?;
        Ok(Some(resume))
    }

    async fn save(&self, resume: &Resume) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(resume)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("saved resume to {}", self.path.display());
        Ok(())
    }
}
