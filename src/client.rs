use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::models::StatsSnapshot;

/// Thin client for the chatbot backend's admin stats endpoint.
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one aggregated snapshot for the trailing `days` window.
    ///
    /// Exactly one request per call. Transport errors, non-2xx statuses, and
    /// undecodable bodies all come back as errors; the caller decides what
    /// the user sees.
    pub async fn fetch_stats(&self, days: u32) -> Result<StatsSnapshot> {
        let url = format!("{}/admin/stats", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("days", days)])
            .send()
            .await
            .with_context(|| format!("stats request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("stats endpoint returned {status}");
        }

        response
            .json::<StatsSnapshot>()
            .await
            .context("malformed stats response body")
    }
}
