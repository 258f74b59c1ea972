//! Main entry point for the AXIS configuration server.

use std::sync::Arc;

use axis_auth::AccessGate;
use axis_persistence::{
    EmbeddedPersistService, ExternalDbPersistService, PersistenceService, StorageMode,
    ensure_schema,
};
use axis_server::{
    model::{AXIS_BANNER_NAME, AXIS_VERSION, AppState, Configuration},
    startup,
};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = Configuration::new()?;

    let logging_config = configuration.logging_config()?;
    let _logging_guard = startup::init_logging(&logging_config)?;

    info!("{} v{} starting", AXIS_BANNER_NAME, AXIS_VERSION);

    // Refuse to start without both secrets
    let auth_config = configuration.auth_config().inspect_err(|e| {
        error!("Invalid auth configuration: {}", e);
    })?;

    let storage_mode = configuration.persistence_mode()?;
    info!("Persistence mode: {}", storage_mode);

    let persistence: Arc<dyn PersistenceService> = match storage_mode {
        StorageMode::ExternalDb => {
            let db = configuration.database_connection().await?;
            ensure_schema(&db).await?;
            Arc::new(ExternalDbPersistService::new(db))
        }
        StorageMode::StandaloneEmbedded => {
            let data_dir = configuration.embedded_data_dir();
            info!("Initializing standalone embedded storage at: {}", data_dir);
            Arc::new(EmbeddedPersistService::open(&data_dir)?)
        }
    };

    if let Err(e) = persistence.health_check().await {
        error!("Storage health check failed: {}", e);
        return Err(e);
    }

    let server_address = configuration.server_address();
    let server_port = configuration.server_port();
    let context_path = configuration.server_context_path();
    let workers = configuration.server_workers();
    let shutdown_timeout = configuration.shutdown_timeout();

    let app_state = Arc::new(AppState::new(
        configuration,
        AccessGate::new(auth_config),
        persistence,
    ));

    info!(
        "Server running on {}:{} (config API at {}/config)",
        server_address, server_port, context_path
    );

    startup::main_server(
        app_state,
        context_path,
        server_address,
        server_port,
        workers,
        shutdown_timeout,
    )?
    .await?;

    info!("Server stopped");
    Ok(())
}
