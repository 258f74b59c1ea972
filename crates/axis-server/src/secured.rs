// Authorization guard for API handlers

use actix_web::{HttpMessage, HttpRequest};

use axis_auth::{AccessLevel, AuthContext, AuthError};

use crate::{middleware::auth::extract_token, model::AppState};

/// Run the access gate for `level` against the request's token.
///
/// Uses the context set by the `Authentication` middleware, reading the
/// header directly when the middleware is not installed.
pub fn authorize(req: &HttpRequest, data: &AppState, level: AccessLevel) -> Result<(), AuthError> {
    let context = req
        .extensions()
        .get::<AuthContext>()
        .cloned()
        .unwrap_or_else(|| extract_token(req.headers()));

    data.access_gate.check(level, context.token())
}

/// Return a 401 response from the enclosing handler unless the request holds
/// a token valid for the given access level.
#[macro_export]
macro_rules! secured {
    ($req: expr, $data: expr, $level: expr) => {
        if let Err(__auth_err) = $crate::secured::authorize($req, $data, $level) {
            return Ok($crate::model::response::ApiResponse::http_error(
                401,
                __auth_err.to_string(),
            ));
        }
    };
}
