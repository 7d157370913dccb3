//! Catalog retrieval
//!
//! A [`CatalogSource`] supplies the raw catalog text. The pipeline never
//! does I/O itself, so tests swap in a [`StaticCatalogSource`] and the CLI
//! can read a local file through [`FileCatalogSource`].

use async_trait::async_trait;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use super::CatalogError;

/// Published Ubuntu cloud image release catalog
pub const DEFAULT_CATALOG_URL: &str =
    "https://cloud-images.ubuntu.com/releases/streams/v1/com.ubuntu.cloud:released:download.json";

/// Trait for anything that can hand over the raw catalog document
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full catalog text
    async fn fetch(&self) -> Result<String, CatalogError>;

    /// Human-readable origin for logging
    fn describe(&self) -> String;
}

/// How many times to try an operation and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (at least one is always made)
    pub max_attempts: u32,

    /// Wait after the first failure; later waits grow linearly
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Wait after failed attempt number `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.initial_backoff.saturating_mul(attempt)
    }
}

/// Run `operation` until it succeeds, fails permanently, or runs out of attempts.
///
/// Only [`CatalogError::is_transient`] failures are retried. The closure
/// receives the 1-based attempt number.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    target: &str,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_transient() => return Err(e),
            Err(e) if attempt >= attempts => {
                return Err(CatalogError::RetriesExhausted {
                    target: target.to_string(),
                    attempts,
                    source: Box::new(e),
                });
            }
            Err(e) => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    "Attempt {}/{} for {} failed: {}; retrying in {:?}",
                    attempt,
                    attempts,
                    target,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Source that returns a fixed document
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    content: String,
}

impl StaticCatalogSource {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> Result<String, CatalogError> {
        Ok(self.content.clone())
    }

    fn describe(&self) -> String {
        "in-memory catalog".to_string()
    }
}

/// Source that reads a catalog saved on disk
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<String, CatalogError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Source that downloads the catalog over HTTP(S), retrying transient failures
#[cfg(feature = "http")]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

#[cfg(feature = "http")]
impl HttpCatalogSource {
    /// Create a source for `url` with a per-request `timeout`
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, CatalogError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .user_agent(concat!("distro-fetcher/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| request_error(&url, e))?;

        Ok(Self { client, url, retry })
    }

    /// Create a source from loaded configuration
    pub fn from_config(config: &crate::config::FetcherConfig) -> Result<Self, CatalogError> {
        Self::new(config.url.clone(), config.timeout(), config.retry_policy())
    }

    async fn fetch_once(&self) -> Result<String, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| request_error(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| request_error(&self.url, e))
    }
}

/// Wrap a reqwest failure; builder errors (bad URL, unsupported scheme) are final
#[cfg(feature = "http")]
fn request_error(url: &str, e: reqwest::Error) -> CatalogError {
    CatalogError::Request {
        url: url.to_string(),
        transient: !e.is_builder(),
        source: Box::new(e),
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<String, CatalogError> {
        let content = with_retry(&self.retry, &self.url, |_| self.fetch_once()).await?;
        tracing::info!("Fetched {} bytes of catalog from {}", content.len(), self.url);
        Ok(content)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
