//! API routing configuration

use actix_web::{HttpResponse, error::InternalError, web};

use crate::model::response::ApiResponse;

use super::{config, health};

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

fn invalid_body<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    tracing::debug!(error = %err, "Rejected request body");
    let response = HttpResponse::BadRequest().json(ApiResponse::error(INVALID_BODY_MESSAGE));
    InternalError::from_response(err, response).into()
}

/// Malformed bodies get the same `{status, message}` shape as validation errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| invalid_body(err))
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| invalid_body(err))
}

/// Register all routes
///
/// Routes:
/// - GET /health - Liveness probe
/// - POST {context_path}/config - Upsert config
/// - GET {context_path}/config/{service}/{env}/{key} - Get config
pub fn configure(cfg: &mut web::ServiceConfig, context_path: &str) {
    cfg.app_data(json_config())
        .app_data(form_config())
        .service(health::health)
        .service(
            web::scope(context_path).service(
                web::scope("/config")
                    .service(config::upsert_config)
                    .service(config::get_config),
            ),
        );
}
