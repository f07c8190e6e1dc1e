use std::sync::Arc;

use tokio::sync::{RwLock, Semaphore};
use tracing::warn;

use crate::config::Config;
use crate::models::resume::Resume;
use crate::storage::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The live document. Handlers hold the write lock for the whole of one
    /// mutation, so a single operation never interleaves with another.
    pub document: Arc<RwLock<Resume>>,
    /// Pluggable persistence. Default: FileStore at RESUME_STORE_PATH.
    pub store: Arc<dyn DocumentStore>,
    /// Bounds concurrent pdflatex subprocesses.
    pub compile_permits: Arc<Semaphore>,
    pub config: Config,
}

impl AppState {
    /// Persists the given snapshot after a mutation. Persistence failures are
    /// logged and swallowed; the in-memory tree stays authoritative.
    pub async fn persist(&self, resume: &Resume) {
        if let Err(e) = self.store.save(resume).await {
            warn!("failed to persist resume: {e}");
        }
    }
}
