//! Persistence traits for the storage abstraction layer
//!
//! Backends: external database (MySQL/PostgreSQL/SQLite via SeaORM) and
//! standalone embedded (RocksDB).

pub mod config;

pub use config::ConfigPersistence;

use async_trait::async_trait;

use crate::model::StorageMode;

/// Unified persistence service trait
#[async_trait]
pub trait PersistenceService: ConfigPersistence + Send + Sync {
    /// Get the current storage mode
    fn storage_mode(&self) -> StorageMode;

    /// Health check for the storage backend
    async fn health_check(&self) -> anyhow::Result<()>;
}
