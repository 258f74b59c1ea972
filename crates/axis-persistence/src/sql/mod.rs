//! SQL-based persistence backend (MySQL/PostgreSQL/SQLite via SeaORM)
//!
//! Upserts are a single `INSERT ... ON CONFLICT DO UPDATE` (or
//! `ON DUPLICATE KEY UPDATE` on MySQL) against the `uk_config_scope` unique
//! key, so the database serializes concurrent writers to the same triple.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set,
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Schema,
    SqlErr,
    sea_query::{Expr, Index, OnConflict},
};
use tracing::{debug, info, warn};

use axis_common::ScopeKey;

use crate::entity::config_record;
use crate::model::{ConfigRecord, StorageMode};
use crate::traits::{ConfigPersistence, PersistenceService};

/// Name of the compound unique key on (service_name, environment, config_key)
pub const UNIQUE_SCOPE_INDEX: &str = "uk_config_scope";

/// Create the `config_records` table and its unique scope key if they do not exist.
pub async fn ensure_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(config_record::Entity);
    stmt.if_not_exists().index(
        Index::create()
            .name(UNIQUE_SCOPE_INDEX)
            .col(config_record::Column::ServiceName)
            .col(config_record::Column::Environment)
            .col(config_record::Column::Key)
            .unique(),
    );

    db.execute(backend.build(&stmt)).await?;
    info!(backend = ?backend, "Config record schema ready");
    Ok(())
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// External database persistence service
///
/// Wraps a SeaORM `DatabaseConnection` and implements the persistence traits
/// with direct queries against `config_records`.
pub struct ExternalDbPersistService {
    db: DatabaseConnection,
}

impl ExternalDbPersistService {
    /// Create a new ExternalDbPersistService with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get a reference to the underlying database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Overwrite value and timestamp of an existing row.
    async fn update_existing(
        &self,
        scope: &ScopeKey,
        value: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<u64> {
        let result = config_record::Entity::update_many()
            .col_expr(config_record::Column::Value, Expr::value(value.to_string()))
            .col_expr(config_record::Column::LastUpdated, Expr::value(now))
            .filter(config_record::Column::ServiceName.eq(scope.service_name.as_str()))
            .filter(config_record::Column::Environment.eq(scope.environment.as_str()))
            .filter(config_record::Column::Key.eq(scope.key.as_str()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Handle a failed upsert insert.
    ///
    /// A unique violation means another writer created the row first, so the
    /// write is applied to that row. Any other error is returned unchanged.
    async fn recover_insert_conflict(
        &self,
        err: DbErr,
        scope: &ScopeKey,
        value: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        if !is_unique_violation(&err) {
            return Err(err.into());
        }

        warn!(scope = %scope, "Unique scope conflict during upsert, applying as update");
        let updated = self.update_existing(scope, value, now).await?;
        if updated == 0 {
            anyhow::bail!("config {} conflicted on insert but no row to update", scope);
        }
        Ok(())
    }
}

// ============================================================================
// PersistenceService implementation
// ============================================================================

#[async_trait]
impl PersistenceService for ExternalDbPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::ExternalDb
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.db.ping().await?;
        Ok(())
    }
}

// ============================================================================
// ConfigPersistence implementation
// ============================================================================

#[async_trait]
impl ConfigPersistence for ExternalDbPersistService {
    async fn config_find_one(&self, scope: &ScopeKey) -> anyhow::Result<Option<ConfigRecord>> {
        let model = config_record::Entity::find()
            .filter(config_record::Column::ServiceName.eq(scope.service_name.as_str()))
            .filter(config_record::Column::Environment.eq(scope.environment.as_str()))
            .filter(config_record::Column::Key.eq(scope.key.as_str()))
            .one(&self.db)
            .await?;

        Ok(model.map(ConfigRecord::from))
    }

    async fn config_upsert(&self, scope: &ScopeKey, value: &str) -> anyhow::Result<ConfigRecord> {
        let now = Utc::now();

        let active = config_record::ActiveModel {
            service_name: Set(scope.service_name.clone()),
            environment: Set(scope.environment.clone()),
            key: Set(scope.key.clone()),
            value: Set(value.to_string()),
            last_updated: Set(now),
            ..Default::default()
        };

        let on_conflict = OnConflict::columns([
            config_record::Column::ServiceName,
            config_record::Column::Environment,
            config_record::Column::Key,
        ])
        .update_columns([
            config_record::Column::Value,
            config_record::Column::LastUpdated,
        ])
        .to_owned();

        if let Err(err) = config_record::Entity::insert(active)
            .on_conflict(on_conflict)
            .exec_without_returning(&self.db)
            .await
        {
            self.recover_insert_conflict(err, scope, value, now).await?;
        }

        debug!(scope = %scope, "Config upserted");

        self.config_find_one(scope)
            .await?
            .ok_or_else(|| anyhow::anyhow!("config {} missing after upsert", scope))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectOptions, Database, PaginatorTrait};

    use super::*;

    async fn sqlite_service() -> ExternalDbPersistService {
        // A single connection keeps every query on the same in-memory database.
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt).await.unwrap();
        ensure_schema(&db).await.unwrap();
        ExternalDbPersistService::new(db)
    }

    async fn row_count(service: &ExternalDbPersistService) -> u64 {
        config_record::Entity::find().count(service.db()).await.unwrap()
    }

    /// Insert without the upsert clause, so an existing triple fails on the unique key.
    async fn plain_insert(service: &ExternalDbPersistService, scope: &ScopeKey) -> DbErr {
        let active = config_record::ActiveModel {
            service_name: Set(scope.service_name.clone()),
            environment: Set(scope.environment.clone()),
            key: Set(scope.key.clone()),
            value: Set("duplicate".to_string()),
            last_updated: Set(Utc::now()),
            ..Default::default()
        };
        config_record::Entity::insert(active)
            .exec_without_returning(service.db())
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn test_upsert_creates_record() {
        let service = sqlite_service().await;
        let scope = ScopeKey::new("billing", "prod", "rate_limit");

        let before = Utc::now();
        let record = service.config_upsert(&scope, "100").await.unwrap();

        assert_eq!(record.scope(), scope);
        assert_eq!(record.value, "100");
        assert!(record.last_updated >= before - chrono::Duration::seconds(1));
        assert_eq!(row_count(&service).await, 1);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_in_place() {
        let service = sqlite_service().await;
        let scope = ScopeKey::new("billing", "prod", "rate_limit");

        let first = service.config_upsert(&scope, "100").await.unwrap();
        let second = service.config_upsert(&scope, "200").await.unwrap();

        assert_eq!(second.value, "200");
        assert!(second.last_updated >= first.last_updated);
        assert_eq!(row_count(&service).await, 1);

        let found = service.config_find_one(&scope).await.unwrap().unwrap();
        assert_eq!(found.value, "200");
    }

    #[tokio::test]
    async fn test_find_one_is_exact_match() {
        let service = sqlite_service().await;
        service
            .config_upsert(&ScopeKey::new("billing", "prod", "rate_limit"), "100")
            .await
            .unwrap();

        let missing = [
            ScopeKey::new("billing", "prod", "rate"),
            ScopeKey::new("Billing", "prod", "rate_limit"),
            ScopeKey::new("billing", "staging", "rate_limit"),
        ];
        for scope in &missing {
            assert!(service.config_find_one(scope).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_distinct_triples_are_independent() {
        let service = sqlite_service().await;
        service
            .config_upsert(&ScopeKey::new("billing", "prod", "rate_limit"), "100")
            .await
            .unwrap();
        service
            .config_upsert(&ScopeKey::new("billing", "staging", "rate_limit"), "5")
            .await
            .unwrap();

        assert_eq!(row_count(&service).await, 2);
        let prod = service
            .config_find_one(&ScopeKey::new("billing", "prod", "rate_limit"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(prod.value, "100");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_upserts_leave_single_record() {
        let service = std::sync::Arc::new(sqlite_service().await);
        let scope = ScopeKey::new("billing", "prod", "rate_limit");
        let values: Vec<String> = (0..16).map(|i| i.to_string()).collect();

        let tasks = values.iter().cloned().map(|value| {
            let service = service.clone();
            let scope = scope.clone();
            tokio::spawn(async move { service.config_upsert(&scope, &value).await })
        });
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        assert_eq!(row_count(&service).await, 1);
        let stored = service.config_find_one(&scope).await.unwrap().unwrap();
        assert!(values.contains(&stored.value));
    }

    #[tokio::test]
    async fn test_unique_key_rejects_duplicate_triple() {
        let service = sqlite_service().await;
        let scope = ScopeKey::new("billing", "prod", "rate_limit");
        service.config_upsert(&scope, "100").await.unwrap();

        let err = plain_insert(&service, &scope).await;
        assert!(is_unique_violation(&err));
        assert_eq!(row_count(&service).await, 1);
    }

    #[tokio::test]
    async fn test_insert_conflict_is_applied_as_update() {
        let service = sqlite_service().await;
        let scope = ScopeKey::new("billing", "prod", "rate_limit");
        let first = service.config_upsert(&scope, "100").await.unwrap();

        let err = plain_insert(&service, &scope).await;
        let now = Utc::now();
        service
            .recover_insert_conflict(err, &scope, "200", now)
            .await
            .unwrap();

        assert_eq!(row_count(&service).await, 1);
        let stored = service.config_find_one(&scope).await.unwrap().unwrap();
        assert_eq!(stored.value, "200");
        assert!(stored.last_updated >= first.last_updated);
    }

    #[tokio::test]
    async fn test_insert_conflict_without_row_fails() {
        let service = sqlite_service().await;
        let existing = ScopeKey::new("billing", "prod", "rate_limit");
        service.config_upsert(&existing, "100").await.unwrap();

        let err = plain_insert(&service, &existing).await;
        let absent = ScopeKey::new("billing", "prod", "timeout");
        let result = service
            .recover_insert_conflict(err, &absent, "30", Utc::now())
            .await;

        assert!(result.is_err());
        assert!(service.config_find_one(&absent).await.unwrap().is_none());
        assert_eq!(row_count(&service).await, 1);
    }

    #[tokio::test]
    async fn test_other_insert_errors_are_returned() {
        let service = sqlite_service().await;
        let scope = ScopeKey::new("billing", "prod", "rate_limit");

        let result = service
            .recover_insert_conflict(DbErr::Custom("disk full".into()), &scope, "1", Utc::now())
            .await;

        assert!(result.unwrap_err().to_string().contains("disk full"));
        assert_eq!(row_count(&service).await, 0);
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let service = sqlite_service().await;
        ensure_schema(service.db()).await.unwrap();
        service.health_check().await.unwrap();
        assert_eq!(service.storage_mode(), StorageMode::ExternalDb);
    }
}
