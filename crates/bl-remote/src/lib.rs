//! Remote store integration for the baby log.
//!
//! The remote is a plain HTTP endpoint holding the whole log as one JSON
//! array:
//! - `GET` returns the full collection
//! - `POST` replaces it with the full collection sent in the body
//!
//! There are no deltas, versions or retries. Callers decide what to do with
//! failures; the CLI session logs them and carries on.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use bl_core::Entry;
use reqwest::{StatusCode, Url};
use thiserror::Error;

/// Default request timeout for remote calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest response body excerpt kept in error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// Remote store errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The configured URL is unusable.
    #[error("invalid remote URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed before a response arrived.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The remote answered with a non-success status.
    #[error("remote returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The remote payload is not a valid entry collection.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

/// A store holding the full entry collection.
pub trait EntryRemote: Send + Sync {
    /// Fetches the full collection.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Entry>, RemoteError>> + Send;

    /// Replaces the remote collection with `entries`.
    fn push(&self, entries: &[Entry]) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

/// HTTP implementation of [`EntryRemote`].
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct HttpRemote {
    http: reqwest::Client,
    url: Url,
}

impl fmt::Debug for HttpRemote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRemote")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpRemote {
    /// Creates a client for the collection at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute `http`/`https` URL, or
    /// if the HTTP client fails to build.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let parsed = Url::parse(url.trim()).map_err(|err| RemoteError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RemoteError::ClientBuild)?;

        Ok(Self { http, url: parsed })
    }

    /// The collection URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl EntryRemote for HttpRemote {
    async fn fetch(&self) -> Result<Vec<Entry>, RemoteError> {
        let response = self.http.get(self.url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let entries = decode_entries(&body)?;
        tracing::debug!(count = entries.len(), url = %self.url, "fetched entries");
        Ok(entries)
    }

    async fn push(&self, entries: &[Entry]) -> Result<(), RemoteError> {
        let response = self
            .http
            .post(self.url.clone())
            .json(entries)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        tracing::debug!(count = entries.len(), url = %self.url, "pushed entries");
        Ok(())
    }
}

/// Decodes a collection payload.
///
/// A blank body or `null` means the remote holds no collection yet. Any
/// malformed entry rejects the whole payload.
pub fn decode_entries(body: &str) -> Result<Vec<Entry>, RemoteError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(RemoteError::InvalidPayload)
}

fn status_error(status: StatusCode, body: &str) -> RemoteError {
    let excerpt: String = body.trim().chars().take(ERROR_BODY_LIMIT).collect();
    RemoteError::Status {
        status,
        body: excerpt,
    }
}
