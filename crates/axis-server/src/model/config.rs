//! Configuration management for the AXIS server
//!
//! Sources, lowest precedence first:
//! 1. `conf/application.yml` (optional)
//! 2. `AXIS_`-prefixed environment variables, `__` between key segments
//!    (`AXIS_SERVER__PORT` sets `server.port`)
//! 3. Command line arguments and their legacy environment names
//!    (`PORT`, `ADMIN_AUTH_TOKEN`, `SERVICE_AUTH_TOKEN`, `DATABASE_URL`)

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use config::{Config, Environment, File};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use axis_auth::AuthConfig;
use axis_persistence::StorageMode;

use crate::startup::{LogRotation, LoggingConfig};

use super::constants::{
    AXIS_AUTH_ADMIN_TOKEN, AXIS_AUTH_SERVICE_TOKEN, DB_POOL_CONNECT_TIMEOUT_SECS,
    DB_POOL_IDLE_TIMEOUT_SECS, DB_POOL_MAX_CONNECTIONS, DB_POOL_MIN_CONNECTIONS, DB_SQLX_LOGGING,
    DB_URL_PROPERTY, DEFAULT_CONFIG_FILE, DEFAULT_CONTEXT_PATH, DEFAULT_SERVER_ADDRESS,
    DEFAULT_SERVER_PORT, DEFAULT_SHUTDOWN_TIMEOUT_SECS, EMBEDDED_DATA_DIR_PROPERTY, ENV_PREFIX,
    ENV_SEPARATOR, LOGS_CONSOLE_PROPERTY, LOGS_FILE_PROPERTY, LOGS_LEVEL_PROPERTY,
    LOGS_PATH_PROPERTY, LOGS_ROTATION_PROPERTY, PERSISTENCE_MODE_PROPERTY,
    SERVER_ADDRESS_PROPERTY, SERVER_CONTEXT_PATH_PROPERTY, SERVER_PORT_PROPERTY,
    SERVER_WORKERS_PROPERTY, SHUTDOWN_TIMEOUT_PROPERTY,
};

/// Command line arguments for the server
#[derive(Debug, Default, Parser)]
#[command(name = "axis-server", version, about = "AXIS centralized configuration server")]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,
    #[arg(short = 'p', long = "port", env = "PORT")]
    pub port: Option<u16>,
    #[arg(long = "admin-token", env = "ADMIN_AUTH_TOKEN", hide_env_values = true)]
    pub admin_token: Option<String>,
    #[arg(long = "service-token", env = "SERVICE_AUTH_TOKEN", hide_env_values = true)]
    pub service_token: Option<String>,
    #[arg(long = "db-url", env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
    /// Storage backend: external_db or standalone_embedded
    #[arg(short = 'm', long = "mode", env = "AXIS_PERSISTENCE_MODE")]
    pub mode: Option<String>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    /// Load configuration from the process command line and environment.
    pub fn new() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(args: Cli) -> anyhow::Result<Self> {
        let mut config_builder = Config::builder()
            .add_source(File::with_name(&args.config_file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );

        if let Some(v) = args.port {
            config_builder = config_builder.set_override(SERVER_PORT_PROPERTY, i64::from(v))?;
        }
        if let Some(v) = args.admin_token {
            config_builder = config_builder.set_override(AXIS_AUTH_ADMIN_TOKEN, v)?;
        }
        if let Some(v) = args.service_token {
            config_builder = config_builder.set_override(AXIS_AUTH_SERVICE_TOKEN, v)?;
        }
        if let Some(v) = args.database_url {
            config_builder = config_builder.set_override(DB_URL_PROPERTY, v)?;
        }
        if let Some(v) = args.mode {
            config_builder = config_builder.set_override(PERSISTENCE_MODE_PROPERTY, v)?;
        }

        let app_config = config_builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", args.config_file))?;

        Ok(Configuration { config: app_config })
    }

    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS_PROPERTY)
            .unwrap_or(DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int(SERVER_PORT_PROPERTY)
            .ok()
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// Route prefix for the config API, normalized to `""` or `/segment[/segment]`.
    pub fn server_context_path(&self) -> String {
        let raw = self
            .config
            .get_string(SERVER_CONTEXT_PATH_PROPERTY)
            .unwrap_or(DEFAULT_CONTEXT_PATH.to_string());

        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }

    pub fn server_workers(&self) -> Option<usize> {
        self.config
            .get_int(SERVER_WORKERS_PROPERTY)
            .ok()
            .and_then(|v| usize::try_from(v).ok())
            .filter(|v| *v > 0)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        let secs = self
            .config
            .get_int(SHUTDOWN_TIMEOUT_PROPERTY)
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    // ========================================================================
    // Auth Configuration
    // ========================================================================

    /// Admin and service secrets; both must be configured and non-empty.
    pub fn auth_config(&self) -> anyhow::Result<AuthConfig> {
        let admin_token = self.config.get_string(AXIS_AUTH_ADMIN_TOKEN).unwrap_or_default();
        let service_token = self
            .config
            .get_string(AXIS_AUTH_SERVICE_TOKEN)
            .unwrap_or_default();

        if admin_token.trim().is_empty() {
            anyhow::bail!(
                "admin token is not configured (set ADMIN_AUTH_TOKEN or {})",
                AXIS_AUTH_ADMIN_TOKEN
            );
        }
        if service_token.trim().is_empty() {
            anyhow::bail!(
                "service token is not configured (set SERVICE_AUTH_TOKEN or {})",
                AXIS_AUTH_SERVICE_TOKEN
            );
        }
        if admin_token == service_token {
            tracing::warn!("Admin and service tokens are identical; readers can write");
        }

        Ok(AuthConfig::new(admin_token, service_token))
    }

    // ========================================================================
    // Persistence Configuration
    // ========================================================================

    pub fn persistence_mode(&self) -> anyhow::Result<StorageMode> {
        match self.config.get_string(PERSISTENCE_MODE_PROPERTY) {
            Ok(v) => v.parse::<StorageMode>().map_err(anyhow::Error::msg),
            Err(_) => Ok(StorageMode::default()),
        }
    }

    pub fn embedded_data_dir(&self) -> String {
        self.config
            .get_string(EMBEDDED_DATA_DIR_PROPERTY)
            .unwrap_or_else(|_| "data/axis".to_string())
    }

    pub async fn database_connection(&self) -> anyhow::Result<DatabaseConnection> {
        let url = self
            .config
            .get_string(DB_URL_PROPERTY)
            .context("database url is not configured (set DATABASE_URL or db.url)")?;

        let max_connections = self.config.get_int(DB_POOL_MAX_CONNECTIONS).unwrap_or(20) as u32;
        let min_connections = self.config.get_int(DB_POOL_MIN_CONNECTIONS).unwrap_or(1) as u32;
        let connect_timeout = self
            .config
            .get_int(DB_POOL_CONNECT_TIMEOUT_SECS)
            .unwrap_or(30) as u64;
        let idle_timeout = self.config.get_int(DB_POOL_IDLE_TIMEOUT_SECS).unwrap_or(600) as u64;
        let sqlx_logging = self.config.get_bool(DB_SQLX_LOGGING).unwrap_or(false);

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(connect_timeout))
            .idle_timeout(Duration::from_secs(idle_timeout))
            .sqlx_logging(sqlx_logging);

        tracing::info!(
            max_connections = max_connections,
            min_connections = min_connections,
            connect_timeout = connect_timeout,
            idle_timeout = idle_timeout,
            sqlx_logging = sqlx_logging,
            "Database connection pool configured"
        );

        Ok(Database::connect(opt).await?)
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_config(&self) -> anyhow::Result<LoggingConfig> {
        let rotation = match self.config.get_string(LOGS_ROTATION_PROPERTY) {
            Ok(v) => v.parse::<LogRotation>().map_err(anyhow::Error::msg)?,
            Err(_) => LogRotation::Daily,
        };

        Ok(LoggingConfig::from_config(
            self.config.get_string(LOGS_PATH_PROPERTY).ok(),
            self.config.get_bool(LOGS_CONSOLE_PROPERTY).unwrap_or(true),
            self.config.get_bool(LOGS_FILE_PROPERTY).unwrap_or(false),
            self.config
                .get_string(LOGS_LEVEL_PROPERTY)
                .unwrap_or("info".to_string()),
            rotation,
        ))
    }
}
