//! Shared HTTP client for the geocoding and forecast services
//!
//! One blocking request per call, with no retries. Failures come back as
//! typed [`ForecastError`]s: transport problems as `Network`, non-2xx
//! answers as `Status`, and undecodable bodies as `Parse`.

use crate::config::HttpConfig;
use crate::{ForecastError, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Blocking JSON-over-HTTP client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Create a new client with an explicit timeout
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// GET `url` and decode the JSON body into `T`
    #[instrument(skip(self, url), fields(url = %redact(url)))]
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let start_time = Instant::now();

        let response = self.client.get(url).send().map_err(|e| {
            warn!("Network error after {:.3}s: {}", start_time.elapsed().as_secs_f64(), e);
            ForecastError::from(e.without_url())
        })?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            warn!("Request failed with status {}", status);
            return Err(ForecastError::status(status.as_u16(), redact(url)));
        }

        let body = response
            .text()
            .map_err(|e| ForecastError::from(e.without_url()))?;

        let parsed = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to decode response body: {}", e);
            ForecastError::parse(e.to_string())
        })?;

        let total_duration = start_time.elapsed();
        info!("Successful API request in {:.3}s", total_duration.as_secs_f64());

        if total_duration.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", total_duration.as_secs_f64());
        }

        Ok(parsed)
    }
}

/// Strip the query string so API keys never reach logs or error messages
#[must_use]
pub fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
