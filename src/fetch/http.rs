//! HTTP script fetching.
//!
//! Downloads installer bootstrap scripts over HTTPS.

use anyhow::{bail, Context};
use reqwest::blocking::Client;
use std::time::Duration;

use super::ScriptFetcher;
use crate::error::{KitupError, Result};

/// Fetches scripts over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("kitup/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn get(&self, url: &str) -> anyhow::Result<String> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {}", response.status());
        }

        let content = response.text()?;
        if content.trim().is_empty() {
            bail!("empty response body");
        }
        Ok(content)
    }
}

impl ScriptFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching {}", url);
        self.get(url).map_err(|e| KitupError::FetchFailed {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
