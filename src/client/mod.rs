//! HTTP client for the Raggadon memory service.
//!
//! Wraps the four endpoints the CLI uses (`/health`, `/save`, `/search`,
//! `/project/{project}/stats`). Each call makes exactly one request with a
//! fixed timeout and no retries.
//!
//! Failures are classified in two levels. Transport problems (connection
//! refused, timeout) always become [`ClientError::ServerUnavailable`], no
//! matter which endpoint was called. A reachable server that reports a
//! failure becomes [`ClientError::Application`] carrying the server's detail.

pub mod types;

use std::time::Duration;

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use types::{Activity, ProjectStats, Role, SaveReceipt, SaveRequest, SearchResult};
use types::{ErrorBody, SearchResponse};

/// Where the service listens unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001";

/// Label used when the server reports a failure without details.
pub const UNKNOWN_FAILURE: &str = "Unbekannter Fehler";

/// Per-operation request timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// `GET /health`
    pub health: Duration,
    /// `GET /project/{project}/stats`
    pub stats: Duration,
    /// `POST /save` and `GET /search`
    pub request: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            health: Duration::from_secs(3),
            stats: Duration::from_secs(5),
            request: Duration::from_secs(10),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused or timed out. The fix is always to start the server.
    #[error("Raggadon server is not reachable")]
    ServerUnavailable,

    /// The server answered but reported a failure.
    #[error("server reported a failure: {0}")]
    Application(String),

    /// The project has no recorded activity (or stats could not be loaded).
    #[error("no statistics for this project yet")]
    NoDataYet,

    /// Anything else: bad URL, unexpected status, undecodable body.
    #[error("request failed: {0}")]
    Request(String),
}

impl ClientError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ServerUnavailable
        } else {
            Self::Request(err.to_string())
        }
    }

    pub fn is_server_unavailable(&self) -> bool {
        matches!(self, Self::ServerUnavailable)
    }
}

/// Typed client bound to one base URL.
#[derive(Debug, Clone)]
pub struct RaggadonClient {
    http: reqwest::Client,
    base_url: String,
    timeouts: Timeouts,
}

impl RaggadonClient {
    pub fn new(base_url: impl Into<String>, timeouts: Timeouts) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            timeouts,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `<base_url>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Request(format!("invalid base URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Request(format!("invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `true` if the server answers `/health` with a JSON body. Never fails.
    pub async fn health_check(&self) -> bool {
        let url = match self.endpoint(&["health"]) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(error = %e, "health check skipped");
                return false;
            }
        };

        let response = match self.http.get(url).timeout(self.timeouts.health).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "health check returned error status");
            return false;
        }

        match response.json::<serde_json::Value>().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "health check returned malformed body");
                false
            }
        }
    }

    /// Store `content` under `project`.
    ///
    /// A response with `success: false` is an [`ClientError::Application`]
    /// error carrying the server's `detail`.
    pub async fn save(
        &self,
        project: &str,
        role: Role,
        content: &str,
    ) -> Result<SaveReceipt, ClientError> {
        let url = self.endpoint(&["save"])?;
        let body = SaveRequest {
            project,
            role,
            content,
        };

        tracing::debug!(project, role = %role, content_len = content.len(), "saving memory");

        let response = self
            .http
            .post(url)
            .json(&body)
            .timeout(self.timeouts.request)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let receipt: SaveReceipt = read_json(response).await?;
        if !receipt.success {
            let detail = receipt
                .detail
                .clone()
                .unwrap_or_else(|| UNKNOWN_FAILURE.to_string());
            return Err(ClientError::Application(detail));
        }

        tracing::debug!(project, tokens = receipt.tokens_used, "memory saved");
        Ok(receipt)
    }

    /// Similar entries for `query` within `project`, in server ranking order.
    pub async fn search(&self, project: &str, query: &str) -> Result<Vec<SearchResult>, ClientError> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut()
            .append_pair("project", project)
            .append_pair("query", query);

        tracing::debug!(project, query, "searching memories");

        let response = self
            .http
            .get(url)
            .timeout(self.timeouts.request)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let body: SearchResponse = read_json(response).await?;
        tracing::debug!(project, results = body.results.len(), "search finished");
        Ok(body.results)
    }

    /// Usage statistics for `project`.
    ///
    /// Every failure maps to [`ClientError::NoDataYet`]: a project without
    /// activity is a normal state, not an outage.
    pub async fn project_stats(&self, project: &str) -> Result<ProjectStats, ClientError> {
        let url = self.endpoint(&["project", project, "stats"])?;

        let result = async {
            let response = self
                .http
                .get(url)
                .timeout(self.timeouts.stats)
                .send()
                .await
                .map_err(ClientError::from_transport)?;
            read_json::<ProjectStats>(response).await
        }
        .await;

        result.map_err(|e| {
            tracing::debug!(project, error = %e, "no project statistics");
            ClientError::NoDataYet
        })
    }
}

/// Decode a JSON body, turning non-2xx answers into errors.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await.map_err(ClientError::from_transport)?;

    if !status.is_success() {
        if let Some(detail) = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail_text())
        {
            return Err(ClientError::Application(detail));
        }
        return Err(ClientError::Request(format!("server returned HTTP {status}")));
    }

    serde_json::from_str(&body)
        .map_err(|e| ClientError::Request(format!("invalid response body: {e}")))
}
