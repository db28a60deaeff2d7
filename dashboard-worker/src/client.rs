//! Statistics API client
//!
//! Reads the JSON feeds the dashboard is built from:
//! - Delivery statistics by day
//! - Picks, palletized and conveyor boxes per interval
//! - PGI lines
//! - Bin layout and activity for the heatmap

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::feed::Feed;
use crate::poller::StatsSource;

/// Statistics API client
pub struct StatsClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl StatsClient {
    /// Create a client for the configured API
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.stats_api_base_url.clone(),
            token: config.stats_api_token.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Full URL of a feed
    pub fn feed_url(&self, feed: Feed) -> String {
        format!("{}{}", self.base_url, feed.api_path())
    }

    /// Get a feed body as JSON
    pub async fn get_feed(&self, feed: Feed) -> Result<Value> {
        self.get_json(&self.feed_url(feed)).await
    }

    /// Perform GET request, with the bearer token if one is configured
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self
            .http
            .get(url)
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle API response, checking for errors
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(DashboardError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DashboardError::Payload(format!("invalid JSON: {e}")))
    }
}

impl StatsSource for StatsClient {
    async fn fetch(&self, feed: Feed) -> Result<Value> {
        self.get_feed(feed).await
    }
}
