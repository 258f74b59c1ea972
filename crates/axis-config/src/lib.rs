//! AXIS Config - Configuration store service
//!
//! Validates upsert input and exposes upsert/lookup over any
//! [`axis_persistence::PersistenceService`] backend.

pub mod model;
pub mod service;

pub use model::{ConfigUpsert, ConfigView, UpsertConfigForm};
pub use service::config::ConfigService;
