//! Configuration service layer
//!
//! Upsert and lookup on top of the persistence backend. Inputs are validated
//! before this layer is reached; storage faults are logged here and surfaced
//! as [`AxisError::Server`].

use std::sync::Arc;

use tracing::{error, info};

use axis_common::{AxisError, ScopeKey};
use axis_persistence::{ConfigRecord, PersistenceService, StorageMode};

use crate::model::ConfigUpsert;

fn storage_fault(operation: &str, scope: &ScopeKey, err: anyhow::Error) -> anyhow::Error {
    error!(operation, scope = %scope, error = %err, "Config storage failure");
    AxisError::Server(format!("{} {}: {}", operation, scope, err)).into()
}

#[derive(Clone)]
pub struct ConfigService {
    persistence: Arc<dyn PersistenceService>,
}

impl ConfigService {
    pub fn new(persistence: Arc<dyn PersistenceService>) -> Self {
        Self { persistence }
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.persistence.storage_mode()
    }

    pub async fn health_check(&self) -> anyhow::Result<()> {
        self.persistence.health_check().await
    }

    /// Create the record for the scope triple or overwrite its value.
    pub async fn upsert(&self, request: ConfigUpsert) -> anyhow::Result<ConfigRecord> {
        let scope = request.scope();
        let record = self
            .persistence
            .config_upsert(scope, request.value())
            .await
            .map_err(|e| storage_fault("upsert", scope, e))?;

        info!(scope = %scope, "Configuration upserted");
        Ok(record)
    }

    /// Exact-match lookup. `Ok(None)` means the triple has no record.
    pub async fn lookup(&self, scope: &ScopeKey) -> anyhow::Result<Option<ConfigRecord>> {
        self.persistence
            .config_find_one(scope)
            .await
            .map_err(|e| storage_fault("lookup", scope, e))
    }
}

impl std::fmt::Debug for ConfigService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigService")
            .field("storage_mode", &self.storage_mode())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axis_persistence::{ConfigPersistence, EmbeddedPersistService};

    use super::*;

    /// Backend whose every call fails, standing in for an unreachable store.
    struct BrokenPersistence;

    #[async_trait]
    impl ConfigPersistence for BrokenPersistence {
        async fn config_find_one(&self, _: &ScopeKey) -> anyhow::Result<Option<ConfigRecord>> {
            anyhow::bail!("connection refused")
        }

        async fn config_upsert(&self, _: &ScopeKey, _: &str) -> anyhow::Result<ConfigRecord> {
            anyhow::bail!("connection refused")
        }
    }

    #[async_trait]
    impl PersistenceService for BrokenPersistence {
        fn storage_mode(&self) -> StorageMode {
            StorageMode::ExternalDb
        }

        async fn health_check(&self) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }
    }

    fn upsert_request(value: &str) -> ConfigUpsert {
        ConfigUpsert::new(ScopeKey::new("billing", "prod", "rate_limit"), value).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_and_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(Arc::new(
            EmbeddedPersistService::open(dir.path()).unwrap(),
        ));

        let created = service.upsert(upsert_request("100")).await.unwrap();
        assert_eq!(created.value, "100");

        let updated = service.upsert(upsert_request("200")).await.unwrap();
        assert_eq!(updated.value, "200");
        assert!(updated.last_updated >= created.last_updated);

        let found = service
            .lookup(&ScopeKey::new("billing", "prod", "rate_limit"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.value, "200");
    }

    #[tokio::test]
    async fn test_lookup_missing_is_none_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(Arc::new(
            EmbeddedPersistService::open(dir.path()).unwrap(),
        ));

        let found = service
            .lookup(&ScopeKey::new("billing", "prod", "unknown"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_is_server_error() {
        let service = ConfigService::new(Arc::new(BrokenPersistence));

        let err = service.upsert(upsert_request("100")).await.unwrap_err();
        let axis = err.downcast_ref::<AxisError>().unwrap();
        assert_eq!(axis.http_status(), 500);
        assert_eq!(axis.public_message(), "Server error");

        let err = service
            .lookup(&ScopeKey::new("billing", "prod", "rate_limit"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AxisError>(),
            Some(AxisError::Server(_))
        ));

        assert!(service.health_check().await.is_err());
    }
}
