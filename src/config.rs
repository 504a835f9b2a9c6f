// src/config.rs
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::utils::error::ExtractError;

pub const DEFAULT_BASE_URL: &str = "https://air-governance-framework.finos.org/";

// Politeness delay before each request; the site has no published limit.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 150;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How item bodies are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// Body is the summary paragraph already present on the index card.
    #[default]
    Shallow,
    /// Body is the flattened content of the item's own detail page.
    Deep,
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shallow" => Ok(Self::Shallow),
            "deep" => Ok(Self::Deep),
            other => Err(format!("unknown extraction mode '{}' (expected shallow or deep)", other)),
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shallow => f.write_str("shallow"),
            Self::Deep => f.write_str("deep"),
        }
    }
}

/// Settings for one extraction pass.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub base_url: Url,
    pub mode: ExtractionMode,
    /// Upper bound on detail pages in flight during deep mode. `1` is sequential.
    pub detail_concurrency: usize,
}

impl ExtractorConfig {
    pub fn new(base_url: &str, mode: ExtractionMode) -> Result<Self, ExtractError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ExtractError::InvalidBaseUrl(base_url.to_string(), e))?;
        Ok(Self {
            base_url,
            mode,
            detail_concurrency: 1,
        })
    }

    pub fn with_detail_concurrency(mut self, concurrency: usize) -> Self {
        self.detail_concurrency = concurrency.max(1);
        self
    }
}

/// Settings for the HTTP fetch collaborator.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub request_delay: Duration,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("finos_extractor/{}", env!("CARGO_PKG_VERSION")),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
