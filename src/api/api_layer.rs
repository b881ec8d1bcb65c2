// HTTP layer - route handlers speaking the web app's wire format.

#[path = "auth.rs"]
pub mod auth;

#[path = "charts.rs"]
pub mod charts;

#[path = "search.rs"]
pub mod search;

#[path = "validate.rs"]
pub mod validate;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::core::charts::ChartService;
use crate::core::drive::DriveClient;
use crate::infra::google::ServiceAccountResolver;

/// Application state shared across handlers.
pub struct AppState<C: DriveClient> {
    pub resolver: Arc<ServiceAccountResolver>,
    pub charts: Arc<ChartService<C>>,
}

impl<C: DriveClient> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            charts: Arc::clone(&self.charts),
        }
    }
}

/// Builds the application router.
pub fn build_router<C: DriveClient + 'static>(state: AppState<C>) -> Router {
    Router::new()
        .route("/auth", post(auth::authenticate::<C>))
        .route("/validate", get(validate::validate::<C>))
        .route(
            "/search",
            get(search::search::<C>).post(search::file_action::<C>),
        )
        .route("/charts", get(charts::search_charts::<C>))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::response::Response;
    use axum::Router;

    use super::*;
    use crate::core::drive::{Credential, DriveFile, DriveQuery, SearchError};

    /// What the stubbed Drive backend answers with.
    pub(crate) enum StubOutcome {
        Files(Vec<DriveFile>),
        Unauthorized(String),
        Provider { status: u16, body: String },
        Transport(String),
    }

    pub(crate) struct StubDrive {
        pub outcome: StubOutcome,
    }

    impl StubDrive {
        fn result(&self) -> Result<Vec<DriveFile>, SearchError> {
            match &self.outcome {
                StubOutcome::Files(files) => Ok(files.clone()),
                StubOutcome::Unauthorized(body) => Err(SearchError::Unauthorized(body.clone())),
                StubOutcome::Provider { status, body } => Err(SearchError::ProviderError {
                    status: *status,
                    body: body.clone(),
                }),
                StubOutcome::Transport(msg) => Err(SearchError::TransportError(msg.clone())),
            }
        }
    }

    #[async_trait]
    impl DriveClient for StubDrive {
        async fn search(
            &self,
            _credential: &Credential,
            _query: &DriveQuery,
        ) -> Result<Vec<DriveFile>, SearchError> {
            self.result()
        }

        async fn probe(&self, _credential: &Credential) -> Result<(), SearchError> {
            self.result().map(|_| ())
        }
    }

    /// Full router over a stubbed Drive backend and the given key blob.
    pub(crate) fn test_router(outcome: StubOutcome, key_json: Option<&str>) -> Router {
        let state = AppState {
            resolver: Arc::new(ServiceAccountResolver::new(key_json.map(String::from))),
            charts: Arc::new(ChartService::new(StubDrive { outcome })),
        };
        build_router(state)
    }

    pub(crate) fn sample_file(id: &str, name: &str) -> DriveFile {
        DriveFile {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: "application/pdf".to_string(),
            modified_time: "2024-01-15T10:30:00.000Z".to_string(),
            web_view_link: Some(format!("https://drive.google.com/file/d/{}/view", id)),
            web_content_link: Some(format!("https://drive.google.com/uc?id={}", id)),
            size: None,
            parents: None,
        }
    }

    pub(crate) async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
