use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::drive::query::DriveQuery;

/// Errors raised while resolving a bearer credential from service account
/// key material.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("service account key is not configured")]
    MissingConfig,
    #[error("service account key is invalid: {0}")]
    InvalidFormat(String),
    #[error("token endpoint rejected the credential exchange: {0}")]
    ProviderRejected(String),
}

/// Errors raised by a Drive file search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No credential was supplied at all. Reported to callers as
    /// "authentication required", distinct from a provider rejection.
    #[error("authentication required")]
    Unauthenticated,
    /// The provider answered 401 for the presented credential. Carries the
    /// raw response body for diagnostics.
    #[error("Drive rejected the credential")]
    Unauthorized(String),
    #[error("network error: {0}")]
    TransportError(String),
    #[error("Drive API error {status}")]
    ProviderError { status: u16, body: String },
}

/// How a credential was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStrategy {
    /// Resolved server-side from service account key material.
    ServiceAccount,
    /// Supplied by the caller, typically from a browser OAuth flow.
    OAuth,
}

/// An opaque bearer token plus its expiry and issuing strategy.
///
/// One credential belongs to one logical session. It is never persisted;
/// callers hand it into each operation explicitly and re-resolve after an
/// `Unauthorized` outcome.
#[derive(Debug, Clone)]
pub struct Credential {
    token: String,
    expires_at: Option<DateTime<Utc>>,
    strategy: CredentialStrategy,
}

impl Credential {
    /// A credential minted from a service account exchange, valid for
    /// `expires_in` seconds from now.
    pub fn service_account(token: String, expires_in: u64) -> Self {
        Self {
            token,
            expires_at: Some(Utc::now() + Duration::seconds(expires_in as i64)),
            strategy: CredentialStrategy::ServiceAccount,
        }
    }

    /// A caller-supplied OAuth token. Its expiry is not known locally; the
    /// provider is the authority and will answer 401 once it lapses.
    pub fn oauth(token: String) -> Self {
        Self {
            token,
            expires_at: None,
            strategy: CredentialStrategy::OAuth,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn strategy(&self) -> CredentialStrategy {
        self.strategy
    }

    /// Whether the token's stated lifetime has run out. Uses a 60 second
    /// leeway so a token is not presented right at its expiry edge.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at - Duration::seconds(60) <= Utc::now(),
            None => false,
        }
    }
}

/// Structured search request. Every field is optional; the empty filter
/// matches all PDFs visible to the credential.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub query: Option<String>,
    pub key: Option<String>,
    pub artist: Option<String>,
}

/// One raw file record as returned by the Drive files listing.
///
/// Field names follow the Drive wire format (camelCase); optionals that the
/// provider omitted stay omitted when the record is serialized back out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub modified_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_content_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,
}

/// Seam between the core search flow and the provider implementation.
#[async_trait]
pub trait DriveClient: Send + Sync {
    /// Runs one search request and returns the first page of results
    /// verbatim. Empty is not an error.
    async fn search(
        &self,
        credential: &Credential,
        query: &DriveQuery,
    ) -> Result<Vec<DriveFile>, SearchError>;

    /// Live credential check: the cheapest authenticated request the
    /// provider accepts. `Ok` means the provider honored the credential.
    async fn probe(&self, credential: &Credential) -> Result<(), SearchError>;
}
