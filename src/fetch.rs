//! HTTP fetching behind a small capability trait.
//!
//! The harvester and the first two extraction stages only need "GET this URL
//! with a timeout and give me the status and body". [`PageFetcher`] is that
//! contract; [`HttpFetcher`] implements it with `reqwest`, sending the
//! browser-like header set from [`HttpConfig`] on every request.

use crate::config::HttpConfig;
use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use std::time::Duration;
use tracing::{debug, instrument};

/// Errors raised while fetching a page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A configured header value is not valid in an HTTP header.
    #[error("invalid header {name}: {message}")]
    InvalidHeader { name: &'static str, message: String },

    /// The HTTP client could not be built.
    #[error("client setup failed: {0}")]
    Client(String),

    /// Connection, TLS, redirect or timeout failure.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be read.
    #[error("failed reading body: {0}")]
    Body(String),
}

/// A fetched page. Non-2xx responses are returned, not raised.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Something that can GET a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError>;
}

/// `reqwest`-backed fetcher with fixed default headers.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(http: &HttpConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers(http)?)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|e| FetchError::InvalidHeader {
        name,
        message: e.to_string(),
    })
}

/// The header set every outbound request carries.
pub fn default_headers(http: &HttpConfig) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header_value("User-Agent", &http.user_agent)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("Accept-Language", &http.accept_language)?,
    );
    headers.insert(REFERER, header_value("Referer", &http.referer)?);
    Ok(headers)
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn get(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        debug!(status, bytes = body.len(), "Fetched page");
        Ok(FetchedPage { status, body })
    }
}
