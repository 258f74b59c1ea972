//! Error taxonomy for AXIS
//!
//! Every request ends in exactly one of four outcomes besides success:
//! - `Validation`: a required field is missing (400)
//! - `Unauthorized`: the credential is missing or wrong (401)
//! - `NotFound`: the scope triple is valid but has no record (404)
//! - `Server`: storage or unexpected failure (500)

/// Message returned to callers for any server-side failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Message returned when an upsert body lacks a required field.
pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: service_name, environment, key, value";

/// Message returned when a lookup finds no record.
pub const CONFIG_NOT_FOUND_MESSAGE: &str = "Configuration not found";

/// Application-specific error types
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AxisError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("server error: {0}")]
    Server(String),
}

impl AxisError {
    pub fn missing_fields() -> Self {
        AxisError::Validation(MISSING_FIELDS_MESSAGE.to_string())
    }

    pub fn config_not_found() -> Self {
        AxisError::NotFound(CONFIG_NOT_FOUND_MESSAGE.to_string())
    }

    /// HTTP-equivalent status for this error category.
    pub fn http_status(&self) -> u16 {
        match self {
            AxisError::Validation(_) => 400,
            AxisError::Unauthorized(_) => 401,
            AxisError::NotFound(_) => 404,
            AxisError::Server(_) => 500,
        }
    }

    /// Message safe to hand back to a caller.
    ///
    /// Server faults never leak their cause; it only goes to the log.
    pub fn public_message(&self) -> &str {
        match self {
            AxisError::Validation(m) | AxisError::Unauthorized(m) | AxisError::NotFound(m) => m,
            AxisError::Server(_) => SERVER_ERROR_MESSAGE,
        }
    }
}
