// src/fetch/mod.rs
pub mod client;

use async_trait::async_trait;

pub use client::HttpFetcher;

/// Outcome of fetching one page. A failed fetch carries an empty body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResponse {
    pub ok: bool,
    pub html: String,
}

impl FetchResponse {
    pub fn success(html: impl Into<String>) -> Self {
        Self { ok: true, html: html.into() }
    }

    pub fn failure() -> Self {
        Self::default()
    }
}

/// Capability used by deep extraction to retrieve detail pages.
/// Retries, caching and rate limiting are the implementor's business.
#[async_trait]
pub trait DetailFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResponse;
}
