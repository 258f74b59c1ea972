// Embedded persistence backend using RocksDB
// Provides standalone (single-node) storage without an external database

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rocksdb::{DB, Options};
use tracing::{debug, info};

use axis_common::ScopeKey;

use crate::model::{ConfigRecord, StorageMode};
use crate::traits::{ConfigPersistence, PersistenceService};

/// Standalone embedded persistence using RocksDB
///
/// Each scope triple maps to exactly one RocksDB key, so uniqueness holds by
/// construction and an upsert is a single atomic put.
pub struct EmbeddedPersistService {
    db: Arc<DB>,
}

impl EmbeddedPersistService {
    /// Open (or create) a RocksDB database at the given directory
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path)
            .map_err(|e| anyhow::anyhow!("RocksDB open error at {}: {}", path.display(), e))?;
        info!(path = %path.display(), "Embedded config storage opened");

        Ok(Self::new(Arc::new(db)))
    }

    /// Create from a raw RocksDB instance
    pub fn new(db: Arc<DB>) -> Self {
        Self { db }
    }

    /// Storage key for a scope triple.
    ///
    /// A JSON array keeps the encoding injective for any field content.
    fn storage_key(scope: &ScopeKey) -> anyhow::Result<Vec<u8>> {
        Ok(serde_json::to_vec(&[
            &scope.service_name,
            &scope.environment,
            &scope.key,
        ])?)
    }
}

#[async_trait]
impl PersistenceService for EmbeddedPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::StandaloneEmbedded
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.db
            .property_value("rocksdb.estimate-num-keys")
            .map_err(|e| anyhow::anyhow!("RocksDB health check error: {}", e))?;
        Ok(())
    }
}

#[async_trait]
impl ConfigPersistence for EmbeddedPersistService {
    async fn config_find_one(&self, scope: &ScopeKey) -> anyhow::Result<Option<ConfigRecord>> {
        let key = Self::storage_key(scope)?;
        let bytes = self
            .db
            .get(&key)
            .map_err(|e| anyhow::anyhow!("RocksDB get error: {}", e))?;

        match bytes {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn config_upsert(&self, scope: &ScopeKey, value: &str) -> anyhow::Result<ConfigRecord> {
        let record = ConfigRecord::new(scope, value, Utc::now());
        let key = Self::storage_key(scope)?;

        self.db
            .put(&key, serde_json::to_vec(&record)?)
            .map_err(|e| anyhow::anyhow!("RocksDB put error: {}", e))?;
        debug!(scope = %scope, "Config upserted");

        Ok(record)
    }
}
