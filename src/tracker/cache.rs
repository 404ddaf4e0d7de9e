use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, instrument};

use crate::shared::AppError;

/// Cache abstraction for small opaque blobs keyed by name
///
/// The live match slot is persisted through this so an interrupted
/// session survives a process restart. Missing keys are not errors.
#[async_trait]
pub trait BlobCache {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn save(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// In-memory blob cache for testing
pub struct InMemoryBlobCache {
    blobs: Mutex<HashMap<String, String>>,
}

impl InMemoryBlobCache {
    pub fn new() -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBlobCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobCache for InMemoryBlobCache {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        let blobs = self.blobs.lock().unwrap();
        Ok(blobs.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut blobs = self.blobs.lock().unwrap();
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut blobs = self.blobs.lock().unwrap();
        blobs.remove(key);
        Ok(())
    }
}

/// File-backed blob cache, one file per key under a root directory
pub struct FileBlobCache {
    root: PathBuf,
}

impl FileBlobCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

#[async_trait]
impl BlobCache for FileBlobCache {
    #[instrument(skip(self))]
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Store(format!("Failed to read cache file: {}", e))),
        }
    }

    #[instrument(skip(self, value))]
    async fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Store(format!("Failed to create cache dir: {}", e)))?;
        tokio::fs::write(self.path_for(key), value)
            .await
            .map_err(|e| AppError::Store(format!("Failed to write cache file: {}", e)))?;
        debug!(key, "Blob saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<(), AppError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Store(format!(
                "Failed to remove cache file: {}",
                e
            ))),
        }
    }
}
