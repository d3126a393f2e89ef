use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::domain::{AdDraft, AdId};
use super::form::FieldErrors;
use super::repository::{AdRepository, RepositoryError};
use super::service::{AdService, AdServiceError};

type SharedService<R> = State<Arc<AdService<R>>>;
type AdPath = Result<Path<u64>, PathRejection>;
type DraftBody = Result<axum::Json<AdDraft>, JsonRejection>;

/// Router builder exposing the form schema and ad endpoints.
pub fn ad_router<R>(service: Arc<AdService<R>>) -> Router
where
    R: AdRepository + 'static,
{
    Router::new()
        .route("/api/form-config", get(form_config_handler::<R>))
        .route("/api/form-config/layout", get(form_layout_handler::<R>))
        .route("/api/ads", get(list_handler::<R>).post(create_handler::<R>))
        .route("/api/ads/ranked", get(ranked_handler::<R>))
        .route("/api/ads/validate", post(validate_handler::<R>))
        .route(
            "/api/ads/:id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route("/api/ads/:id/copy", get(copy_handler::<R>))
        .route("/api/ads/:id/click", post(click_handler::<R>))
        .with_state(service)
}

fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    let payload = json!({
        "success": true,
        "data": data,
    });
    (status, axum::Json(payload)).into_response()
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({
        "success": false,
        "message": message.into(),
    });
    (status, axum::Json(payload)).into_response()
}

fn rejected(errors: &FieldErrors) -> Response {
    let payload = json!({
        "success": false,
        "message": "Validation failed",
        "errors": errors,
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

fn service_failure(error: AdServiceError) -> Response {
    match error {
        AdServiceError::Invalid(errors) => rejected(&errors),
        AdServiceError::Repository(RepositoryError::NotFound) => {
            failure(StatusCode::NOT_FOUND, RepositoryError::NotFound.to_string())
        }
        AdServiceError::Repository(other) => {
            warn!(error = %other, "ad repository failure");
            failure(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

/// Ids that do not parse cannot name a stored ad.
fn ad_id(path: AdPath) -> Result<AdId, Response> {
    match path {
        Ok(Path(id)) => Ok(AdId(id)),
        Err(rejection) => {
            warn!(error = %rejection, "unparsable ad id");
            Err(failure(
                StatusCode::NOT_FOUND,
                RepositoryError::NotFound.to_string(),
            ))
        }
    }
}

fn ad_draft(body: DraftBody) -> Result<AdDraft, Response> {
    match body {
        Ok(axum::Json(draft)) => Ok(draft),
        Err(rejection) => Err(failure(rejection.status(), rejection.body_text())),
    }
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, AdServiceError>) -> Response {
    match result {
        Ok(data) => success(status, data),
        Err(error) => service_failure(error),
    }
}

pub(crate) async fn form_config_handler<R>(State(service): SharedService<R>) -> Response
where
    R: AdRepository + 'static,
{
    success(StatusCode::OK, service.form_config())
}

pub(crate) async fn form_layout_handler<R>(State(service): SharedService<R>) -> Response
where
    R: AdRepository + 'static,
{
    success(StatusCode::OK, service.form_layout())
}

pub(crate) async fn list_handler<R>(State(service): SharedService<R>) -> Response
where
    R: AdRepository + 'static,
{
    respond(StatusCode::OK, service.list())
}

pub(crate) async fn ranked_handler<R>(State(service): SharedService<R>) -> Response
where
    R: AdRepository + 'static,
{
    respond(StatusCode::OK, service.ranked())
}

pub(crate) async fn validate_handler<R>(
    State(service): SharedService<R>,
    body: DraftBody,
) -> Response
where
    R: AdRepository + 'static,
{
    let draft = match ad_draft(body) {
        Ok(draft) => draft,
        Err(response) => return response,
    };
    let errors = service.validate(&draft);
    let payload = json!({
        "success": true,
        "data": {
            "valid": errors.is_empty(),
            "errors": errors,
        },
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn create_handler<R>(
    State(service): SharedService<R>,
    body: DraftBody,
) -> Response
where
    R: AdRepository + 'static,
{
    match ad_draft(body) {
        Ok(draft) => respond(StatusCode::CREATED, service.create(draft)),
        Err(response) => response,
    }
}

pub(crate) async fn get_handler<R>(
    State(service): SharedService<R>,
    path: AdPath,
) -> Response
where
    R: AdRepository + 'static,
{
    match ad_id(path) {
        Ok(id) => respond(StatusCode::OK, service.get(id)),
        Err(response) => response,
    }
}

pub(crate) async fn copy_handler<R>(
    State(service): SharedService<R>,
    path: AdPath,
) -> Response
where
    R: AdRepository + 'static,
{
    match ad_id(path) {
        Ok(id) => respond(StatusCode::OK, service.copy_draft(id)),
        Err(response) => response,
    }
}

pub(crate) async fn update_handler<R>(
    State(service): SharedService<R>,
    path: AdPath,
    body: DraftBody,
) -> Response
where
    R: AdRepository + 'static,
{
    let id = match ad_id(path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match ad_draft(body) {
        Ok(draft) => respond(StatusCode::OK, service.update(id, draft)),
        Err(response) => response,
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): SharedService<R>,
    path: AdPath,
) -> Response
where
    R: AdRepository + 'static,
{
    let id = match ad_id(path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match service.delete(id) {
        Ok(_) => {
            let payload = json!({
                "success": true,
                "message": "Ad deleted successfully",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_failure(error),
    }
}

pub(crate) async fn click_handler<R>(
    State(service): SharedService<R>,
    path: AdPath,
) -> Response
where
    R: AdRepository + 'static,
{
    match ad_id(path) {
        Ok(id) => respond(StatusCode::OK, service.record_click(id)),
        Err(response) => response,
    }
}
