//! AXIS Auth - Shared-secret access control
//!
//! This crate provides:
//! - The two access levels (admin write, service read)
//! - The request-scoped auth context carrying the presented token
//! - The access gate that checks tokens against the configured secrets

pub mod model;
pub mod service;

// Re-export commonly used types
pub use model::*;
pub use service::gate::AccessGate;
