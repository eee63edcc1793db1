//! Feed API client with rate-limit retry.
//!
//! The feed throttles aggressively, so every read goes through
//! [`FeedClient::fetch`], which retries 429 responses with exponential
//! backoff and surfaces everything else as "data unavailable" rather than
//! an error. Callers must treat `None` as "no data", never as an empty
//! result set.

use crate::config::FeedConfig;
use crate::error::Result;
use crate::feed::types::{DriverList, ResultsDocument, Schedule};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Raw outcome of a single GET against the feed.
#[derive(Debug, Clone)]
pub struct FeedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body, when the response carried one.
    pub body: Option<serde_json::Value>,
}

impl FeedResponse {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    pub fn status_only(status: u16) -> Self {
        Self { status, body: None }
    }

    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// Transport seam between the retry loop and the network, so the retry
/// behavior can be exercised without a live feed.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<FeedResponse>;
}

/// Production transport over a pooled reqwest client.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<FeedResponse> {
        let response = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.json().await.ok();
        Ok(FeedResponse { status, body })
    }
}

/// Client for the three feed read endpoints.
pub struct FeedClient<T: FeedTransport = HttpTransport> {
    config: FeedConfig,
    transport: T,
}

impl FeedClient<HttpTransport> {
    /// Create a client backed by a real HTTP transport.
    pub fn new(config: FeedConfig) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self { config, transport })
    }
}

impl<T: FeedTransport> FeedClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(config: FeedConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Fetch a JSON document, retrying rate-limit responses with
    /// exponential backoff.
    ///
    /// Returns `None` when the data is unavailable for any reason:
    /// transport failure, a non-429 error status (no retry), or the
    /// retry budget exhausted on consecutive 429s. Every retry and every
    /// terminal failure is logged.
    pub async fn fetch(&self, url: &str) -> Option<serde_json::Value> {
        for attempt in 0..self.config.max_retries {
            let response = match self.transport.get(url).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(url, error = %e, "feed request failed");
                    return None;
                }
            };

            if response.is_success() {
                if response.body.is_none() {
                    tracing::warn!(url, status = response.status, "feed returned no JSON body");
                }
                return response.body;
            }

            if response.is_rate_limited() {
                let wait = Duration::from_secs(self.config.backoff_factor.pow(attempt));
                tracing::warn!(
                    url,
                    attempt,
                    wait_secs = wait.as_secs(),
                    "feed rate limit exceeded, retrying"
                );
                tokio::time::sleep(wait).await;
            } else {
                tracing::warn!(url, status = response.status, "feed returned error status");
                return None;
            }
        }

        tracing::warn!(
            url,
            retries = self.config.max_retries,
            "feed still rate limited after all retries"
        );
        None
    }

    /// Fetch the season race schedule.
    pub async fn fetch_schedule(&self) -> Option<Schedule> {
        self.fetch_typed(&self.config.schedule_url()).await
    }

    /// Fetch the driver roster.
    pub async fn fetch_driver_list(&self) -> Option<DriverList> {
        self.fetch_typed(&self.config.driver_list_url()).await
    }

    /// Fetch the results document for one race.
    pub async fn fetch_race_results(&self, race_id: &str) -> Option<ResultsDocument> {
        self.fetch_typed(&self.config.race_results_url(race_id)).await
    }

    async fn fetch_typed<D: DeserializeOwned>(&self, url: &str) -> Option<D> {
        let document = self.fetch(url).await?;
        match serde_json::from_value(document) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(url, error = %e, "feed document did not match expected shape");
                None
            }
        }
    }
}
