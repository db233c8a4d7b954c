use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::{
    error::{Result, WttrError},
    model::WeatherDocument,
};

use super::{Endpoint, WeatherProvider};

const TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct WttrProvider {
    endpoint: Endpoint,
    http: Client,
}

impl WttrProvider {
    pub fn new(endpoint: Endpoint) -> Result<Self> {
        let http = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| WttrError::FetchFailure(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { endpoint, http })
    }

    async fn request(&self, location: &str) -> anyhow::Result<WeatherDocument> {
        let url = self.endpoint.url(location);
        log::debug!("requesting {url}");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.endpoint))?;

        let status = res.status();
        let body = res.text().await.context("Failed to read weather response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse weather JSON")
    }
}

#[async_trait]
impl WeatherProvider for WttrProvider {
    async fn fetch(&self, location: &str) -> Result<WeatherDocument> {
        self.request(location).await.map_err(|e| {
            log::warn!("fetch from {} failed: {e:#}", self.endpoint);
            WttrError::FetchFailure(format!("{e:#}"))
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
