//! JSON file store

use async_trait::async_trait;
use dreams_core::{Document, DocumentStore, RepoResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{map_io_error, map_json_error};

/// Keeps the document in a single JSON file
///
/// Saves write a sibling temp file first and rename it over the target, so a
/// crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> RepoResult<Document> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Document::default()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(map_json_error),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No data file yet, starting empty");
                Ok(Document::default())
            }
            Err(e) => Err(map_io_error(e)),
        }
    }

    async fn save(&self, document: &Document) -> RepoResult<()> {
        let bytes = serde_json::to_vec_pretty(document).map_err(map_json_error)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(map_io_error)?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes).await.map_err(map_io_error)?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(map_io_error)
    }
}
