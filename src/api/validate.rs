use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::core::drive::DriveClient;
use crate::infra::google::KeyStatus;

#[derive(Debug, Serialize)]
struct ValidateResponse {
    valid: bool,
}

/// GET /validate
///
/// Cheap local credential check: is the service account key present and
/// syntactically valid JSON? Missing and malformed configurations answer
/// with different statuses so the web app can tell them apart.
pub async fn validate<C: DriveClient>(State(state): State<AppState<C>>) -> Response {
    tracing::debug!("credential validation requested");

    let (status, valid) = match state.resolver.status() {
        KeyStatus::Valid => (StatusCode::OK, true),
        KeyStatus::Missing => (StatusCode::UNAUTHORIZED, false),
        KeyStatus::Malformed => (StatusCode::BAD_REQUEST, false),
    };

    (status, Json(ValidateResponse { valid })).into_response()
}
