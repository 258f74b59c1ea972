// Main library module for AXIS - a centralized key-value configuration server

// Module declarations
pub mod api; // API handlers and routing
pub mod error; // HTTP error mapping
pub mod middleware; // HTTP middleware
pub mod model; // Data models and types
pub mod secured; // Per-handler authorization guard
pub mod startup; // Application startup utilities
