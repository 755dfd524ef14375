//! Upstream API clients.
//!
//! One client per source, all sharing an [`HttpClient`] with:
//! - connection pooling via reqwest
//! - a fixed per-request timeout
//! - request logging middleware
//!
//! Each client issues exactly one request per call and never returns an error past
//! its boundary: transport failures, non-2xx statuses, and non-JSON bodies are
//! logged and become an empty result. There are no retries and no caching.

mod gemini;
mod github;
mod kaggle;
mod middleware;
mod papers_with_code;
mod semantic_scholar;
mod zenodo;

pub use gemini::GeminiClient;
pub use github::GitHubClient;
pub use kaggle::KaggleClient;
pub use middleware::RequestLogger;
pub use papers_with_code::PapersWithCodeClient;
pub use semantic_scholar::SemanticScholarClient;
pub use zenodo::ZenodoClient;

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{Lookup, ResourceLink, SourceKind};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A secondary source queried with a keyword string during enrichment.
#[async_trait::async_trait]
pub trait SecondarySource: Send + Sync {
    /// Which source this is.
    fn kind(&self) -> SourceKind;

    /// Look up links for `keywords`.
    ///
    /// Returns [`Lookup::Unavailable`] only when the source lacks credentials.
    async fn lookup(&self, keywords: &str) -> Lookup<ResourceLink>;
}

/// Shared HTTP client with middleware.
#[derive(Clone)]
pub struct HttpClient {
    client: ClientWithMiddleware,
    request_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        let client = ClientBuilder::new(client).with(RequestLogger).build();

        Ok(Self { client, request_timeout: config.request_timeout })
    }

    /// Start a GET request.
    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).header(reqwest::header::ACCEPT, "application/json")
    }

    /// Start a POST request with a JSON body.
    pub(crate) fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> ClientResult<RequestBuilder> {
        let body = serde_json::to_string(body)?;
        Ok(self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body))
    }

    /// Send a request and decode a JSON response.
    pub(crate) async fn send_json<T>(&self, request: RequestBuilder) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let response = handle_response(response).await?;
        ensure_json(&response)?;

        let value: serde_json::Value = response.json().await?;
        serde_json::from_value(value).map_err(ClientError::from)
    }

    fn transport_error(&self, err: reqwest_middleware::Error) -> ClientError {
        match err {
            reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
                ClientError::Timeout(self.request_timeout)
            }
            reqwest_middleware::Error::Reqwest(e) => ClientError::Http(e),
            other => ClientError::Middleware(other),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").field("request_timeout", &self.request_timeout).finish()
    }
}

/// Reject non-success statuses.
async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    Err(ClientError::status(status.as_u16(), text))
}

/// Reject bodies that are not JSON.
fn ensure_json(response: &reqwest::Response) -> ClientResult<()> {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if content_type.contains("json") {
        Ok(())
    } else {
        Err(ClientError::UnexpectedContentType(content_type.to_string()))
    }
}

/// Collapse a failed call into the empty value, logging why.
pub(crate) fn degrade<T: Default>(source: &'static str, result: ClientResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) if e.is_upstream_rejection() => {
            tracing::warn!(source, error = %e, "Upstream rejected request, using empty result");
            T::default()
        }
        Err(e) => {
            tracing::warn!(source, error = %e, "Upstream unavailable, using empty result");
            T::default()
        }
    }
}
