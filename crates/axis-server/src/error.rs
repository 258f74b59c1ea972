// Error handling for AXIS HTTP handlers
// Bridges anyhow-propagated errors to actix-web responses

use std::fmt::{Display, Formatter};

use actix_web::{HttpResponse, http::StatusCode};

pub use axis_common::error::{
    AxisError, CONFIG_NOT_FOUND_MESSAGE, MISSING_FIELDS_MESSAGE, SERVER_ERROR_MESSAGE,
};

use crate::model::response::ApiResponse;

// Local wrapper so actix-web's ResponseError can be implemented
// (Cannot impl foreign trait for foreign type due to orphan rules)
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl From<AxisError> for AppError {
    fn from(value: AxisError) -> Self {
        AppError {
            inner: value.into(),
        }
    }
}

impl AppError {
    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        let status = self
            .downcast_ref::<AxisError>()
            .map(AxisError::http_status)
            .unwrap_or(500);
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        match self.downcast_ref::<AxisError>() {
            Some(e) => ApiResponse::http_error(e.http_status(), e.public_message()),
            None => {
                tracing::error!(error = %self.inner, "Unhandled error while serving request");
                ApiResponse::http_error(500, SERVER_ERROR_MESSAGE)
            }
        }
    }
}
