use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::core::drive::{CredentialError, DriveClient};

/// Shown when no service account key is configured at all.
const MISSING_KEY_ERROR: &str = "請在環境變數中設定 GOOGLE_SERVICE_ACCOUNT_KEY。\
請將 Service Account 的 JSON 憑證內容設定為此環境變數。";

/// Shown when the configured key blob cannot be used as credentials.
const INVALID_KEY_ERROR: &str = "Service Account 憑證格式無效。\
請確認 GOOGLE_SERVICE_ACCOUNT_KEY 環境變數包含有效的 JSON 格式憑證。";

const AUTH_FAILED_ERROR: &str = "Service account authentication failed";

#[derive(Debug, Serialize)]
struct AuthResponse {
    access_token: String,
    token_type: &'static str,
    expires_in: u32,
}

#[derive(Debug, Serialize)]
struct AuthError {
    error: String,
}

/// POST /auth
///
/// Resolves a service account credential and hands the bearer token to the
/// web app. Configuration problems are the caller's to fix (400); a failed
/// exchange with the provider is not (500).
pub async fn authenticate<C: DriveClient>(State(state): State<AppState<C>>) -> Response {
    tracing::info!("service account authentication requested");

    match state.resolver.resolve().await {
        Ok(credential) => (
            StatusCode::OK,
            Json(AuthResponse {
                access_token: credential.token().to_string(),
                token_type: "Bearer",
                expires_in: 3600,
            }),
        )
            .into_response(),
        Err(CredentialError::MissingConfig) => {
            tracing::warn!("no service account key configured");
            (
                StatusCode::BAD_REQUEST,
                Json(AuthError {
                    error: MISSING_KEY_ERROR.to_string(),
                }),
            )
                .into_response()
        }
        Err(CredentialError::InvalidFormat(err)) => {
            tracing::error!("service account key rejected: {}", err);
            (
                StatusCode::BAD_REQUEST,
                Json(AuthError {
                    error: INVALID_KEY_ERROR.to_string(),
                }),
            )
                .into_response()
        }
        Err(CredentialError::ProviderRejected(err)) => {
            tracing::error!("token exchange failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthError {
                    error: AUTH_FAILED_ERROR.to_string(),
                }),
            )
                .into_response()
        }
    }
}
