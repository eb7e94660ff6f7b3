//! Schedule RPC HTTP client.
//!
//! Queries the hosted database service through its PostgREST-style RPC
//! endpoint. The client owns bounded retry with linear backoff; by the
//! time an error reaches the caller it is terminal for that request.

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};

use crate::domain::ScheduleEntry;
use crate::normalize::VariantTable;

use super::ScheduleService;
use super::convert::convert_rows;
use super::error::BackendError;
use super::types::{ScheduleParams, ScheduleRow};

/// RPC function serving timetable lookups.
const SCHEDULE_FUNCTION: &str = "get_bus_schedule";

/// Default number of attempts per fetch (initial try plus retries).
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Backoff between attempt `n` and `n + 1` is `n` times this.
const BACKOFF_UNIT: std::time::Duration = std::time::Duration::from_secs(1);

/// Configuration for the RPC client.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Anonymous API key for the hosted database service.
    pub api_key: String,
    /// Base URL of the service.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Attempts per fetch before surfacing a terminal failure.
    pub max_attempts: u32,
}

impl RpcConfig {
    /// Create a config with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout_secs: 30,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the attempt budget (minimum 1).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }
}

/// HTTP client for the schedule RPC.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
    table: VariantTable,
}

impl RpcClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RpcConfig) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| BackendError::AuthenticationFailed)?;
        headers.insert(HeaderName::from_static("apikey"), api_key);

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| BackendError::AuthenticationFailed)?;
        headers.insert(reqwest::header::AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            max_attempts: config.max_attempts,
            table: VariantTable::default(),
        })
    }

    async fn fetch_once(
        &self,
        params: &ScheduleParams,
    ) -> Result<Vec<ScheduleEntry>, BackendError> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, SCHEDULE_FUNCTION);

        let response = self.http.post(&url).json(params).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(BackendError::AuthenticationFailed);
        }

        if status == reqwest::StatusCode::NOT_IMPLEMENTED {
            return Err(BackendError::NotImplemented);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::InvalidResponse {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let rows: Vec<ScheduleRow> =
            serde_json::from_str(&body).map_err(|e| BackendError::JsonParsingFailed {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        if rows.is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        convert_rows(&rows, &self.table)
    }
}

impl ScheduleService for RpcClient {
    /// Fetch the timetable for a station pair on a target date.
    ///
    /// Station names must already be search-normalized. Transient failures
    /// are retried up to the attempt budget, sleeping `attempt × 1s`
    /// between attempts.
    async fn fetch_schedules(
        &self,
        departure: &str,
        arrival: &str,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleEntry>, BackendError> {
        let params = ScheduleParams {
            departure_station: departure.to_string(),
            arrival_station: arrival.to_string(),
            target_date: date.format("%Y-%m-%d").to_string(),
        };

        let mut attempt = 1;
        loop {
            match self.fetch_once(&params).await {
                Ok(entries) => {
                    debug!(rows = entries.len(), attempt, "schedule fetch succeeded");
                    return Ok(entries);
                }
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    warn!(error = %e, attempt, "schedule fetch failed, retrying");
                    tokio::time::sleep(BACKOFF_UNIT * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = RpcConfig::new("https://example.supabase.co", "anon-key");
        assert_eq!(config.base_url, "https://example.supabase.co");
        assert_eq!(config.api_key, "anon-key");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn config_builder() {
        let config = RpcConfig::new("http://localhost:54321", "key")
            .with_timeout(5)
            .with_max_attempts(1);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_attempts, 1);
    }

    #[test]
    fn attempt_budget_is_at_least_one() {
        let config = RpcConfig::new("http://localhost:54321", "key").with_max_attempts(0);
        assert_eq!(config.max_attempts, 1);
    }

    #[test]
    fn client_creation() {
        let config = RpcConfig::new("http://localhost:54321", "key");
        assert!(RpcClient::new(config).is_ok());
    }

    // Retry behaviour against a live endpoint is covered by the mock
    // service tests in the engine; exercising the HTTP path needs real
    // credentials and is out of scope for unit tests.
}
