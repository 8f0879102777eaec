//! File storage for uploaded resumes.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::errors::{AppError, AppResult};

/// Blob storage keyed by relative paths such as `<user_id>/<resume_id>.pdf`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store content under a key, replacing any previous content.
    async fn put(&self, key: &str, content: Bytes) -> AppResult<()>;

    /// Read the content stored under a key.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Remove a key. Missing keys are not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Filesystem storage rooted at the upload directory.
pub struct FilesystemBackend {
    base_path: PathBuf,
}

impl FilesystemBackend {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Resolve a key under the base path. Only plain relative components
    /// are accepted.
    fn key_to_path(&self, key: &str) -> AppResult<PathBuf> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !valid {
            return Err(AppError::Storage(format!("Invalid storage key: {}", key)));
        }

        Ok(self.base_path.join(relative))
    }
}

#[async_trait]
impl FileStorage for FilesystemBackend {
    async fn put(&self, key: &str, content: Bytes) -> AppResult<()> {
        let path = self.key_to_path(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write to a sibling temp file, then rename over the target
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&content).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &path).await?;

        tracing::debug!(key = %key, size = content.len(), "Stored file");
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        let path = self.key_to_path(key)?;
        let content = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound
            } else {
                AppError::Storage(e.to_string())
            }
        })?;
        Ok(Bytes::from(content))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.key_to_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
