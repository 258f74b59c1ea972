//! Authentication and authorization models

use axis_common::AxisError;

// Auth configuration keys
pub const AXIS_AUTH_ADMIN_TOKEN: &str = "auth.admin_token";
pub const AXIS_AUTH_SERVICE_TOKEN: &str = "auth.service_token";

pub const NO_TOKEN_MESSAGE: &str = "No authentication token provided";
pub const INVALID_ADMIN_TOKEN_MESSAGE: &str = "Unauthorized: Invalid admin token";
pub const INVALID_SERVICE_TOKEN_MESSAGE: &str = "Unauthorized: Invalid service token";

/// Secrets the gate checks against, loaded once at startup
#[derive(Clone)]
pub struct AuthConfig {
    pub admin_token: String,
    pub service_token: String,
}

impl AuthConfig {
    pub fn new(admin_token: impl Into<String>, service_token: impl Into<String>) -> Self {
        Self {
            admin_token: admin_token.into(),
            service_token: service_token.into(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_token", &"<redacted>")
            .field("service_token", &"<redacted>")
            .finish()
    }
}

/// Access level an operation requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Write access: admin secret only
    Admin,
    /// Read access: service secret or admin secret
    Service,
}

/// Per-request authentication context, populated by the HTTP middleware
#[derive(Clone, Debug, Default)]
pub struct AuthContext {
    pub token: Option<String>,
}

impl AuthContext {
    /// Build from a raw header value; blank values count as no token.
    ///
    /// A non-blank value is kept byte for byte and compared as sent.
    pub fn from_header_value(value: Option<&str>) -> Self {
        let token = value
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string);
        Self { token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Authorization failure
///
/// Both variants of a failed check share the 401 category; only the message
/// tells a missing token apart from a wrong one.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("{}", NO_TOKEN_MESSAGE)]
    MissingToken,

    #[error("{}", INVALID_ADMIN_TOKEN_MESSAGE)]
    InvalidAdminToken,

    #[error("{}", INVALID_SERVICE_TOKEN_MESSAGE)]
    InvalidServiceToken,
}

impl From<AuthError> for AxisError {
    fn from(value: AuthError) -> Self {
        AxisError::Unauthorized(value.to_string())
    }
}
