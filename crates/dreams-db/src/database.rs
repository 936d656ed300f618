//! Serialized access to the workspace document

use dreams_common::StorageConfig;
use dreams_core::{Document, DocumentStore, DomainError};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::store::{JsonFileStore, MemoryStore};

/// Handle to the workspace document
///
/// Every access loads the full document while holding one process-wide lock,
/// so read-modify-write cycles are totally ordered and no update is lost.
/// Cloning is cheap and clones share the lock.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
    lock: Arc<Mutex<()>>,
}

impl Database {
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self::from_arc(Arc::new(store))
    }

    pub fn from_arc(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Run `f` against a snapshot of the document
    pub async fn read<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Document) -> Result<T, E>,
        E: From<DomainError>,
    {
        let _guard = self.lock.lock().await;
        let document = self.store.load().await?;
        f(&document)
    }

    /// Run `f` against the document and save it if `f` succeeds
    ///
    /// When `f` fails nothing is written, so validation inside `f` must happen
    /// before any mutation it wants to keep.
    pub async fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Document) -> Result<T, E>,
        E: From<DomainError>,
    {
        let _guard = self.lock.lock().await;
        let mut document = self.store.load().await?;
        let output = f(&mut document)?;
        self.store.save(&document).await?;
        Ok(output)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

/// Open the database described by the storage configuration
pub fn open_database(config: &StorageConfig) -> Database {
    match &config.data_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using JSON file store");
            Database::new(JsonFileStore::new(path.clone()))
        }
        None => {
            tracing::info!("Using in-memory store");
            Database::new(MemoryStore::new())
        }
    }
}
