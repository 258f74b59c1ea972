//! HTTP response types for the AXIS server
//!
//! Every non-lookup body has the shape `{status, message?, data?}`.

use actix_web::{HttpResponse, HttpResponseBuilder, http::StatusCode};
use serde::{Deserialize, Serialize};

use axis_common::{STATUS_ERROR, STATUS_SUCCESS};

/// Generic status envelope for API responses
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            status: STATUS_SUCCESS.to_string(),
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn ok(message: impl Into<String>) -> Self {
        ApiResponse {
            status: STATUS_SUCCESS.to_string(),
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            status: STATUS_ERROR.to_string(),
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn http_error(status: u16, message: impl Into<String>) -> HttpResponse {
        HttpResponseBuilder::new(
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        )
        .json(ApiResponse::error(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_has_no_data() {
        let json = serde_json::to_value(ApiResponse::error("Configuration not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "message": "Configuration not found"})
        );
    }

    #[test]
    fn test_success_body_carries_data() {
        let json = serde_json::to_value(ApiResponse::success("done", 7)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], 7);
    }

    #[test]
    fn test_http_error_status() {
        let resp = ApiResponse::http_error(401, "No authentication token provided");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
