use actix_web::{HttpResponse, Responder, get};

use crate::model::{constants::AXIS_BANNER_NAME, response::ApiResponse};

/// Liveness probe; does not touch storage.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::ok(format!("{} is running", AXIS_BANNER_NAME)))
}
