//! Application state management
//!
//! This module defines the central application state shared across all handlers.

use std::sync::Arc;

use axis_auth::AccessGate;
use axis_config::ConfigService;
use axis_persistence::PersistenceService;

use super::config::Configuration;

/// Application state shared across all handlers
///
/// Built once at startup; handlers only read it.
#[derive(Clone, Debug)]
pub struct AppState {
    pub configuration: Configuration,
    pub access_gate: AccessGate,
    pub config_service: ConfigService,
}

impl AppState {
    pub fn new(
        configuration: Configuration,
        access_gate: AccessGate,
        persistence: Arc<dyn PersistenceService>,
    ) -> Self {
        Self {
            configuration,
            access_gate,
            config_service: ConfigService::new(persistence),
        }
    }
}
