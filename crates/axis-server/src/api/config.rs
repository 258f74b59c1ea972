//! Config API handlers
//!
//! - POST `{ctx}/config` - Upsert a config value (admin token)
//! - GET `{ctx}/config/{service}/{env}/{key}` - Fetch a config value (service or admin token)

use actix_web::{Either, HttpRequest, HttpResponse, get, post, web};

use axis_auth::AccessLevel;
use axis_common::{AxisError, ScopeKey};
use axis_config::{ConfigView, UpsertConfigForm};

use crate::{error::AppError, model::AppState, model::response::ApiResponse, secured};

pub const UPSERT_SUCCESS_MESSAGE: &str = "Configuration upserted successfully.";

type UpsertBody = Either<web::Json<UpsertConfigForm>, web::Form<UpsertConfigForm>>;

/// The body is decoded before the handler runs, so a decode failure is held
/// until the admin check has passed.
#[post("")]
pub async fn upsert_config(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: Result<UpsertBody, actix_web::Error>,
) -> Result<HttpResponse, AppError> {
    secured!(&req, &data, AccessLevel::Admin);

    let form = match body {
        Ok(Either::Left(json)) => json.into_inner(),
        Ok(Either::Right(form)) => form.into_inner(),
        Err(err) => return Ok(err.error_response()),
    };
    let request = form.validate()?;

    let record = data.config_service.upsert(request).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(UPSERT_SUCCESS_MESSAGE, record)))
}

#[get("/{service}/{env}/{key}")]
pub async fn get_config(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> Result<HttpResponse, AppError> {
    secured!(&req, &data, AccessLevel::Service);

    let scope = ScopeKey::from(path.into_inner());

    match data.config_service.lookup(&scope).await? {
        Some(record) => Ok(HttpResponse::Ok().json(ConfigView::from(record))),
        None => Err(AxisError::config_not_found().into()),
    }
}
