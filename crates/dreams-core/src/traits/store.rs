//! Document store trait - whole-document persistence port
//!
//! The workspace is a single document. A store can only load all of it or
//! overwrite all of it; it offers no isolation between concurrent callers.
//! Serializing read-modify-write cycles is the job of the layer above.

use async_trait::async_trait;

use crate::entities::Document;
use crate::error::DomainError;

/// Result type for store operations
pub type RepoResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load the whole document. A store that has never been written returns an empty document.
    async fn load(&self) -> RepoResult<Document>;

    /// Overwrite the whole document
    async fn save(&self, document: &Document) -> RepoResult<()>;
}
