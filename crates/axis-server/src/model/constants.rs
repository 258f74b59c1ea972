//! Configuration keys and defaults for the AXIS server

pub use axis_auth::model::{AXIS_AUTH_ADMIN_TOKEN, AXIS_AUTH_SERVICE_TOKEN};

pub const AXIS_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AXIS_BANNER_NAME: &str = "AXIS Config Engine";

pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";
pub const ENV_PREFIX: &str = "AXIS";
pub const ENV_SEPARATOR: &str = "__";

// Server
pub const SERVER_ADDRESS_PROPERTY: &str = "server.address";
pub const SERVER_PORT_PROPERTY: &str = "server.port";
pub const SERVER_CONTEXT_PATH_PROPERTY: &str = "server.context_path";
pub const SERVER_WORKERS_PROPERTY: &str = "server.workers";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_CONTEXT_PATH: &str = "/api/v1";

// Persistence
pub const PERSISTENCE_MODE_PROPERTY: &str = "persistence.mode";
pub const EMBEDDED_DATA_DIR_PROPERTY: &str = "embedded.data_dir";
pub const DB_URL_PROPERTY: &str = "db.url";
pub const DB_POOL_MAX_CONNECTIONS: &str = "db.pool.max_connections";
pub const DB_POOL_MIN_CONNECTIONS: &str = "db.pool.min_connections";
pub const DB_POOL_CONNECT_TIMEOUT_SECS: &str = "db.pool.connect_timeout_secs";
pub const DB_POOL_IDLE_TIMEOUT_SECS: &str = "db.pool.idle_timeout_secs";
pub const DB_SQLX_LOGGING: &str = "db.pool.sqlx_logging";

// Logging
pub const LOGS_PATH_PROPERTY: &str = "logs.path";
pub const LOGS_LEVEL_PROPERTY: &str = "logs.level";
pub const LOGS_CONSOLE_PROPERTY: &str = "logs.console";
pub const LOGS_FILE_PROPERTY: &str = "logs.file";
pub const LOGS_ROTATION_PROPERTY: &str = "logs.rotation";

// Shutdown
pub const SHUTDOWN_TIMEOUT_PROPERTY: &str = "shutdown.timeout_secs";
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;
