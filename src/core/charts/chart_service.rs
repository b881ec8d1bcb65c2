use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::charts::metadata;
use crate::core::drive::{Credential, DriveClient, DriveFile, DriveQuery, SearchError, SearchFilter};

/// A chord chart derived from one Drive file. Created once per record and
/// never mutated; `id` always equals the originating file id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordChart {
    pub id: String,
    pub song_name: String,
    pub artist: String,
    pub key: String,
    pub file_name: String,
    pub last_modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl ChordChart {
    /// Enriches a raw file record. Never rejects a record: names that don't
    /// follow the chart naming convention get the documented defaults.
    pub fn from_file(file: DriveFile) -> Self {
        let meta = metadata::extract(&file.name);
        Self {
            id: file.id,
            song_name: meta.song_name,
            artist: meta.artist,
            key: meta.key,
            last_modified: format_modified_date(&file.modified_time),
            download_url: file.web_content_link,
            file_name: file.name,
        }
    }
}

/// Renders a Drive timestamp the way the web app displays dates (`2024/1/15`).
/// An unparseable timestamp is passed through untouched.
fn format_modified_date(modified_time: &str) -> String {
    DateTime::parse_from_rfc3339(modified_time)
        .map(|dt| dt.with_timezone(&Utc).format("%Y/%-m/%-d").to_string())
        .unwrap_or_else(|_| modified_time.to_string())
}

/// Search orchestration: filter -> query -> Drive search -> metadata
/// enrichment. Holds no credential; every operation takes the caller's
/// credential explicitly, so concurrent sessions never share token state.
pub struct ChartService<C: DriveClient> {
    client: C,
}

impl<C: DriveClient> ChartService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Raw Drive records for a filter, first result page, order verbatim.
    pub async fn search_files(
        &self,
        credential: &Credential,
        filter: &SearchFilter,
    ) -> Result<Vec<DriveFile>, SearchError> {
        let query = DriveQuery::build(filter);
        tracing::debug!(query = %query, "searching Drive");
        self.client.search(credential, &query).await
    }

    /// Enriched chord charts for a filter.
    pub async fn search_charts(
        &self,
        credential: &Credential,
        filter: &SearchFilter,
    ) -> Result<Vec<ChordChart>, SearchError> {
        let files = self.search_files(credential, filter).await?;
        Ok(files.into_iter().map(ChordChart::from_file).collect())
    }

    /// Live round-trip check: does the provider accept this credential?
    /// Never fails; any rejection or transport problem reads as `false`.
    pub async fn validate_live(&self, credential: &Credential) -> bool {
        self.client.probe(credential).await.is_ok()
    }

    /// Direct-download URL for a file, built deterministically from its id.
    pub fn download_url(&self, file_id: &str) -> String {
        format!("https://drive.google.com/uc?id={}&export=download", file_id)
    }

    /// Browser preview URL for a file.
    pub fn view_url(&self, file_id: &str) -> String {
        format!("https://drive.google.com/file/d/{}/view", file_id)
    }
}
