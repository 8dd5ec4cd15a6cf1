//! HTTP client for the upstream menu endpoint.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::{debug, instrument, warn};
use trattoria_core::MenuItem;
use url::Url;

use super::MenuError;
use crate::config::MenuSourceConfig;

/// Menu service client.
#[derive(Clone)]
pub struct MenuClient {
    client: reqwest::Client,
    url: Url,
    timeout: Duration,
    attempts: u32,
    backoff: Duration,
}

impl MenuClient {
    /// Create a new menu client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &MenuSourceConfig) -> Result<Self, MenuError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            timeout: config.timeout,
            attempts: config.attempts.max(1),
            backoff: config.backoff,
        })
    }

    /// Endpoint this client fetches from.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the menu, retrying transient failures.
    ///
    /// Attempt `n` (1-based) is preceded by a `(n - 1) * backoff` pause.
    ///
    /// # Errors
    ///
    /// Returns the last error once attempts are exhausted, or the first
    /// non-retryable error.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_menu(&self) -> Result<Vec<MenuItem>, MenuError> {
        let mut attempt = 1;
        loop {
            match self.fetch_once().await {
                Ok(items) => {
                    debug!(attempt, count = items.len(), "Menu fetched");
                    return Ok(items);
                }
                Err(e) if e.is_retryable() && attempt < self.attempts => {
                    warn!(attempt, error = %e, "Menu fetch failed, retrying");
                    tokio::time::sleep(self.backoff * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One `GET` against the menu endpoint, bounded by the timeout.
    async fn fetch_once(&self) -> Result<Vec<MenuItem>, MenuError> {
        let request = async {
            let response = self.client.get(self.url.clone()).send().await?;
            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(MenuError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice::<Vec<MenuItem>>(&bytes)?)
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(Err(MenuError::Http(e))) if e.is_timeout() => Err(MenuError::Timeout),
            Ok(result) => result,
            Err(_) => Err(MenuError::Timeout),
        }
    }
}
