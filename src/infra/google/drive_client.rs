use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::core::drive::{Credential, DriveClient, DriveFile, DriveQuery, SearchError};

/// Field projection requested for every file listing; keep in sync with the
/// `DriveFile` record.
const FILE_FIELDS: &str =
    "files(id,name,mimeType,modifiedTime,webViewLink,webContentLink,size,parents)";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Drive REST API client. It deliberately exposes only the read-only calls
/// the core layer needs: a file search and a credential probe.
pub struct GoogleDriveClient {
    client: Client,
    base_url: String,
}

impl GoogleDriveClient {
    pub fn new() -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SearchError::TransportError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: "https://www.googleapis.com/drive/v3".to_string(),
        })
    }

    async fn list_files(
        &self,
        credential: &Credential,
        params: &[(&str, &str)],
    ) -> Result<FilesListResponse, SearchError> {
        if credential.token().is_empty() {
            return Err(SearchError::Unauthenticated);
        }

        let url = format!("{}/files", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .bearer_auth(credential.token())
            .send()
            .await
            .map_err(|e| SearchError::TransportError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED {
                tracing::warn!("Drive rejected the credential: {}", body);
                return Err(SearchError::Unauthorized(body));
            }
            tracing::warn!("Drive API returned {}: {}", status, body);
            return Err(SearchError::ProviderError {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SearchError::TransportError(e.to_string()))
    }
}

#[async_trait]
impl DriveClient for GoogleDriveClient {
    // One request per search; only the first result page is fetched. The
    // chart library is a single shared folder, well under one page.
    async fn search(
        &self,
        credential: &Credential,
        query: &DriveQuery,
    ) -> Result<Vec<DriveFile>, SearchError> {
        let rendered = query.render();
        tracing::debug!(query = %rendered, "Drive file search");

        let listing = self
            .list_files(credential, &[("q", rendered.as_str()), ("fields", FILE_FIELDS)])
            .await?;

        tracing::info!("Drive search returned {} file(s)", listing.files.len());
        Ok(listing.files)
    }

    async fn probe(&self, credential: &Credential) -> Result<(), SearchError> {
        self.list_files(credential, &[("pageSize", "1"), ("fields", "files(id)")])
            .await
            .map(|_| ())
    }
}

#[derive(Debug, Deserialize)]
struct FilesListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::drive::SearchFilter;

    fn unreachable_client() -> GoogleDriveClient {
        GoogleDriveClient {
            client: Client::new(),
            base_url: "http://127.0.0.1:1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_credential_fails_before_any_request() {
        // Unreachable host proves no request is attempted
        let client = unreachable_client();
        let credential = Credential::oauth(String::new());
        let query = DriveQuery::build(&SearchFilter::default());

        let err = client.search(&credential, &query).await.unwrap_err();
        assert!(matches!(err, SearchError::Unauthenticated));

        let err = client.probe(&credential).await.unwrap_err();
        assert!(matches!(err, SearchError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_connection_failure_is_a_transport_error() {
        let client = unreachable_client();
        let credential = Credential::oauth("tok".to_string());
        let query = DriveQuery::build(&SearchFilter::default());

        let err = client.search(&credential, &query).await.unwrap_err();
        assert!(matches!(err, SearchError::TransportError(_)));
    }

    #[test]
    fn test_listing_defaults_to_empty_files() {
        let listing: FilesListResponse = serde_json::from_str("{}").unwrap();
        assert!(listing.files.is_empty());
    }

    #[test]
    fn test_listing_parses_drive_records() {
        let listing: FilesListResponse = serde_json::from_str(
            r#"{"files": [{
                "id": "f1",
                "name": "Amazing_Grace-John_Newton-Gm.pdf",
                "mimeType": "application/pdf",
                "modifiedTime": "2024-01-15T10:30:00.000Z",
                "webViewLink": "https://drive.google.com/file/d/f1/view",
                "size": "48213",
                "parents": ["folder1"]
            }]}"#,
        )
        .unwrap();

        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].id, "f1");
        assert_eq!(listing.files[0].mime_type, "application/pdf");
        assert!(listing.files[0].web_content_link.is_none());
    }
}
