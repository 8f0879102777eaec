//! Readiness probes for external dependencies.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use super::{Cache, Database, FileStorage};

/// Key written and read back by the storage readiness check.
const STORAGE_HEALTH_KEY: &str = ".health/ready";

/// A dependency the service needs to be ready.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Name reported in the readiness payload.
    fn name(&self) -> &'static str;

    /// `Err` carries a message describing the failure.
    async fn check(&self) -> Result<(), String>;
}

#[async_trait]
impl HealthProbe for Database {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        self.ping().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl HealthProbe for Cache {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn check(&self) -> Result<(), String> {
        self.ping().await.map_err(|e| e.to_string())
    }
}

/// Round-trips a small file through the upload storage.
pub struct StorageHealth {
    storage: Arc<dyn FileStorage>,
}

impl StorageHealth {
    pub fn new(storage: Arc<dyn FileStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl HealthProbe for StorageHealth {
    fn name(&self) -> &'static str {
        "storage"
    }

    async fn check(&self) -> Result<(), String> {
        let marker = Bytes::from_static(b"ok");
        self.storage
            .put(STORAGE_HEALTH_KEY, marker.clone())
            .await
            .map_err(|e| e.to_string())?;

        let read_back = self
            .storage
            .get(STORAGE_HEALTH_KEY)
            .await
            .map_err(|e| e.to_string())?;
        if read_back != marker {
            return Err("storage returned different content".to_string());
        }

        self.storage
            .delete(STORAGE_HEALTH_KEY)
            .await
            .map_err(|e| e.to_string())
    }
}
