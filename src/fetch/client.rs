// src/fetch/client.rs
use async_trait::async_trait;
use reqwest::header;

use crate::config::FetchConfig;
use crate::fetch::{DetailFetcher, FetchResponse};
use crate::utils::error::FetchError;

/// reqwest-backed fetcher for index and detail pages.
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Downloads one page, failing on network errors and non-2xx statuses.
    pub async fn download(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!("Downloading page from: {}", url);

        // --- Politeness delay ---
        if !self.config.request_delay.is_zero() {
            tokio::time::sleep(self.config.request_delay).await;
        }

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("HTTP error status: {} for URL: {}", status, url);
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

        Ok(body)
    }
}

#[async_trait]
impl DetailFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResponse {
        match self.download(url).await {
            Ok(html) => FetchResponse::success(html),
            Err(e) => {
                // The caller reports the failure with item context.
                tracing::debug!("Fetch failed for {}: {}", url, e);
                FetchResponse::failure()
            }
        }
    }
}
