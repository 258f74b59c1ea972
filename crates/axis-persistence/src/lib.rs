//! AXIS Persistence - Config record storage
//!
//! This crate provides:
//! - The SeaORM entity for the `config_records` table
//! - Persistence trait abstractions shared by all backends
//! - An external database backend and an embedded RocksDB backend

pub mod embedded;
pub mod entity;
pub mod model;
pub mod sql;
pub mod traits;

// Re-export sea-orm for convenience
pub use sea_orm;

pub use traits::{ConfigPersistence, PersistenceService};

pub use sql::{ExternalDbPersistService, ensure_schema};

pub use embedded::EmbeddedPersistService;

pub use model::{ConfigRecord, StorageMode};
