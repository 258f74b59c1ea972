//! Domain model types for the persistence abstraction layer
//!
//! These types are returned from the persistence traits, decoupled from
//! specific storage backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use axis_common::ScopeKey;

use crate::entity::config_record;

/// A stored configuration value and the scope it belongs to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub service_name: String,
    pub environment: String,
    pub key: String,
    pub value: String,
    pub last_updated: DateTime<Utc>,
}

impl ConfigRecord {
    pub fn new(scope: &ScopeKey, value: &str, last_updated: DateTime<Utc>) -> Self {
        Self {
            service_name: scope.service_name.clone(),
            environment: scope.environment.clone(),
            key: scope.key.clone(),
            value: value.to_string(),
            last_updated,
        }
    }

    pub fn scope(&self) -> ScopeKey {
        ScopeKey::new(&self.service_name, &self.environment, &self.key)
    }
}

impl From<config_record::Model> for ConfigRecord {
    fn from(model: config_record::Model) -> Self {
        Self {
            service_name: model.service_name,
            environment: model.environment,
            key: model.key,
            value: model.value,
            last_updated: model.last_updated,
        }
    }
}

/// Storage mode for the persistence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorageMode {
    /// External database (MySQL/PostgreSQL/SQLite via SeaORM)
    #[default]
    ExternalDb,
    /// Standalone embedded RocksDB (single node, no external DB)
    StandaloneEmbedded,
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageMode::ExternalDb => write!(f, "external_db"),
            StorageMode::StandaloneEmbedded => write!(f, "standalone_embedded"),
        }
    }
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "external_db" => Ok(StorageMode::ExternalDb),
            "standalone_embedded" => Ok(StorageMode::StandaloneEmbedded),
            _ => Err(format!("Invalid storage mode: {}", s)),
        }
    }
}
