//! Config persistence trait
//!
//! Defines the interface for configuration storage operations.

use async_trait::async_trait;

use axis_common::ScopeKey;

use crate::model::ConfigRecord;

/// Configuration persistence operations
#[async_trait]
pub trait ConfigPersistence: Send + Sync {
    /// Find the record stored under an exact scope triple
    async fn config_find_one(&self, scope: &ScopeKey) -> anyhow::Result<Option<ConfigRecord>>;

    /// Create or overwrite the record for a scope triple and return its post-write state.
    ///
    /// Must never leave more than one record per triple, even under concurrent calls.
    async fn config_upsert(&self, scope: &ScopeKey, value: &str) -> anyhow::Result<ConfigRecord>;
}
