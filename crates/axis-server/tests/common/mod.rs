//! Common test utilities for the HTTP API tests
//!
//! - `app_state` / `embedded_state` / `sqlite_state`: build an `AppState` over a real backend
//! - `init_app!`: wire the state into an actix test service the way the server does

use std::sync::Arc;

use axis_auth::AccessGate;
use axis_persistence::sea_orm::{ConnectOptions, Database};
use axis_persistence::{
    EmbeddedPersistService, ExternalDbPersistService, PersistenceService, ensure_schema,
};
use axis_server::model::{AppState, Configuration};
use tempfile::TempDir;

pub const ADMIN_TOKEN: &str = "test-admin-secret";
pub const SERVICE_TOKEN: &str = "test-service-secret";

pub fn app_state(persistence: Arc<dyn PersistenceService>) -> Arc<AppState> {
    let config = config::Config::builder()
        .set_override("auth.admin_token", ADMIN_TOKEN)
        .unwrap()
        .set_override("auth.service_token", SERVICE_TOKEN)
        .unwrap()
        .build()
        .unwrap();
    let configuration = Configuration::from_config(config);
    let auth_config = configuration.auth_config().unwrap();

    Arc::new(AppState::new(
        configuration,
        AccessGate::new(auth_config),
        persistence,
    ))
}

/// State over RocksDB in a temp directory; keep the `TempDir` alive for the test.
#[allow(dead_code)]
pub fn embedded_state() -> (Arc<AppState>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let persistence = EmbeddedPersistService::open(dir.path()).unwrap();
    (app_state(Arc::new(persistence)), dir)
}

/// State over an in-memory SQLite database.
#[allow(dead_code)]
pub async fn sqlite_state() -> Arc<AppState> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    ensure_schema(&db).await.unwrap();
    app_state(Arc::new(ExternalDbPersistService::new(db)))
}

/// Build a test service with the auth middleware and routes under `$context_path`.
macro_rules! init_app {
    ($state: expr, $context_path: expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(axis_server::middleware::auth::Authentication)
                .app_data(actix_web::web::Data::from($state))
                .configure(|cfg| axis_server::api::configure(cfg, $context_path)),
        )
        .await
    };
}
