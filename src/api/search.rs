use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::AppState;
use crate::core::drive::{Credential, DriveClient, DriveFile, SearchError, SearchFilter};

/// Shown when the caller never presented a token.
const AUTH_REQUIRED_ERROR: &str = "需要 Google 授權。請先完成 OAuth 驗證流程。";

/// Shown when Drive answers 401 for the presented token.
const SESSION_EXPIRED_ERROR: &str = "Google 授權已過期，請重新登入。";

/// Shown when Drive could not be reached at all.
const CONNECT_FAILED_ERROR: &str = "連接 Google Drive 時發生錯誤";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub key: Option<String>,
    pub artist: Option<String>,
    pub access_token: Option<String>,
}

impl SearchParams {
    /// Splits the caller's parameters into the credential and the filter.
    /// An empty token counts as absent.
    pub(crate) fn into_parts(self) -> (Option<Credential>, SearchFilter) {
        let credential = self
            .access_token
            .filter(|token| !token.is_empty())
            .map(Credential::oauth);
        let filter = SearchFilter {
            query: self.q,
            key: self.key,
            artist: self.artist,
        };
        (credential, filter)
    }
}

#[derive(Debug, Serialize)]
struct FilesResponse {
    files: Vec<DriveFile>,
}

/// Failure body for search endpoints. Only the fields relevant to the
/// particular failure are serialized.
#[derive(Debug, Serialize)]
struct SearchFailure {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<String>,
    #[serde(rename = "requiresAuth", skip_serializing_if = "Option::is_none")]
    requires_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

/// GET /search?q=&key=&artist=&access_token=
///
/// Runs one Drive search and returns the raw file records verbatim.
pub async fn search<C: DriveClient>(
    State(state): State<AppState<C>>,
    Query(params): Query<SearchParams>,
) -> Response {
    tracing::info!(
        query = ?params.q,
        key = ?params.key,
        artist = ?params.artist,
        has_token = params.access_token.is_some(),
        "Drive search requested"
    );

    let (credential, filter) = params.into_parts();
    let Some(credential) = credential else {
        return missing_token_response();
    };

    match state.charts.search_files(&credential, &filter).await {
        Ok(files) => {
            tracing::info!("search succeeded with {} file(s)", files.len());
            (StatusCode::OK, Json(FilesResponse { files })).into_response()
        }
        Err(err) => failure_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct FileActionRequest {
    action: Option<String>,
    #[serde(rename = "fileId")]
    file_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct DownloadResponse {
    #[serde(rename = "downloadUrl")]
    download_url: String,
}

/// POST /search
///
/// File actions. `download` answers with a deterministic direct-download
/// URL for the file id; everything else is rejected.
pub async fn file_action<C: DriveClient>(
    State(state): State<AppState<C>>,
    payload: Result<Json<FileActionRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to process request"})),
        )
            .into_response();
    };

    match request.action.as_deref() {
        Some("download") => {
            let file_id = request.file_id.unwrap_or_default();
            (
                StatusCode::OK,
                Json(DownloadResponse {
                    download_url: state.charts.download_url(&file_id),
                }),
            )
                .into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid action"})),
        )
            .into_response(),
    }
}

pub(crate) fn missing_token_response() -> Response {
    tracing::warn!("search rejected: no access token provided");
    (
        StatusCode::UNAUTHORIZED,
        Json(SearchFailure {
            error: AUTH_REQUIRED_ERROR.to_string(),
            debug: Some("Missing access_token".to_string()),
            requires_auth: Some(true),
            status: None,
        }),
    )
        .into_response()
}

/// Maps a search failure to the wire format. Provider statuses pass through
/// so the web app sees what Drive answered; a provider 401 additionally
/// signals that re-authentication will help.
pub(crate) fn failure_response(err: SearchError) -> Response {
    match err {
        SearchError::Unauthenticated => missing_token_response(),
        SearchError::Unauthorized(body) => (
            StatusCode::UNAUTHORIZED,
            Json(SearchFailure {
                error: SESSION_EXPIRED_ERROR.to_string(),
                debug: Some(body),
                requires_auth: Some(true),
                status: None,
            }),
        )
            .into_response(),
        SearchError::ProviderError { status, body } => {
            let status_code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            let reason = status_code.canonical_reason().unwrap_or("");
            (
                status_code,
                Json(SearchFailure {
                    error: format!("Google Drive API 錯誤: {} - {}", status, reason),
                    debug: Some(body),
                    requires_auth: None,
                    status: Some(status),
                }),
            )
                .into_response()
        }
        SearchError::TransportError(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SearchFailure {
                error: CONNECT_FAILED_ERROR.to_string(),
                debug: Some(msg),
                requires_auth: None,
                status: None,
            }),
        )
            .into_response(),
    }
}
