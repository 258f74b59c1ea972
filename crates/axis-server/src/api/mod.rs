// HTTP API handlers and routing
pub mod config;
pub mod health;
pub mod route;

pub use route::configure;
