//! Plain HTTP page fetcher used by the content extractor.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::BasePageFetcher;

/// Some sites refuse requests without a browser-looking agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build page fetch client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BasePageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{} returned HTTP {}", url, status.as_u16());
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read body from {}", url))
    }
}
