//! AXIS Common - Shared types used across all AXIS components
//!
//! - Error taxonomy and caller-facing messages
//! - The scope triple identifying a config value
//! - Wire-level constants shared by the server and its clients

pub mod error;
pub mod scope;

pub use error::AxisError;
pub use scope::ScopeKey;

/// Request header carrying the shared-secret credential
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Values of the `status` field in response bodies
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";
