use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::search::{failure_response, missing_token_response, SearchParams};
use crate::api::AppState;
use crate::core::charts::ChordChart;
use crate::core::drive::DriveClient;

#[derive(Debug, Serialize)]
struct ChartsResponse {
    charts: Vec<ChordChart>,
}

/// GET /charts?q=&key=&artist=&access_token=
///
/// Same search as GET /search, but each record is enriched into a chord
/// chart (song name, artist, key parsed out of the file name).
pub async fn search_charts<C: DriveClient>(
    State(state): State<AppState<C>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let (credential, filter) = params.into_parts();
    let Some(credential) = credential else {
        return missing_token_response();
    };

    match state.charts.search_charts(&credential, &filter).await {
        Ok(charts) => {
            tracing::info!("chart search succeeded with {} chart(s)", charts.len());
            (StatusCode::OK, Json(ChartsResponse { charts })).into_response()
        }
        Err(err) => failure_response(err),
    }
}
