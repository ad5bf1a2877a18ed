//! Pluggable HTTP transport.
//!
//! A [`Transport`] takes a complete, already-encoded URL, performs a single
//! GET and hands back the raw response body. The client never talks to the
//! network directly, so tests can swap in a stub that records URLs and
//! returns canned bodies.
//!
//! [`HttpTransport`] is the default implementation. It makes exactly one
//! attempt per call, applies a request and a connect timeout, and follows
//! redirects with reqwest's default policy.

use crate::config::DigitalOceanConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("digitalocean-client/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Fetches a URL and returns the response body as text.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET for `url` and return the full body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionFailed`] when the request cannot be
    /// completed or the server answers with a non-success status.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Build a transport with the default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransportUnavailable`] if the HTTP client cannot be
    /// constructed (for example when the TLS backend fails to initialise).
    pub fn new() -> Result<Self> {
        Self::with_timeouts(
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    /// Build a transport using the timeouts from a client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransportUnavailable`] if the HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &DigitalOceanConfig) -> Result<Self> {
        Self::with_timeouts(config.timeout(), config.connect_timeout())
    }

    /// Build a transport with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransportUnavailable`] if the HTTP client cannot be
    /// constructed.
    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let http = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|err| {
                Error::TransportUnavailable(format!("Failed to build HTTP client: {err}"))
            })?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %redact_api_key(url), "GET");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            Error::ConnectionFailed(format!("Failed to read response body: {err}"))
        })?;

        if !status.is_success() {
            warn!(%status, "DigitalOcean API returned an error status");
            return Err(Error::ConnectionFailed(format!("HTTP {status}: {body}")));
        }

        Ok(body)
    }
}

/// Replace the `api_key` query value so a URL can be logged.
#[must_use]
pub fn redact_api_key(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return "<invalid url>".to_string();
    };

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "api_key" {
                "REDACTED".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    if !pairs.is_empty() {
        parsed.query_pairs_mut().clear().extend_pairs(pairs);
    }
    parsed.to_string()
}
