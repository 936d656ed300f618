//! In-memory store

use async_trait::async_trait;
use dreams_core::{Document, DocumentStore, RepoResult};
use tokio::sync::RwLock;

/// Keeps the document in process memory; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document
    pub fn with_document(document: Document) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> RepoResult<Document> {
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, document: &Document) -> RepoResult<()> {
        *self.document.write().await = document.clone();
        Ok(())
    }
}
