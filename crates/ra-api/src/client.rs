//! HTTP client wrapper for the ra.co GraphQL endpoint.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::sleep;

use crate::error::{Error, Result};
use crate::graphql::{GraphQlRequest, GraphQlResponse};

/// The GraphQL endpoint.
const BASE_URL: &str = "https://ra.co/graphql";

/// The endpoint rejects requests without a browser-looking Referer.
const REFERER: &str = "https://ra.co/events";

/// And without a browser-looking User-Agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:106.0) Gecko/20100101 Firefox/106.0";

/// Default initial backoff for retries (1 second).
const DEFAULT_INITIAL_BACKOFF_SECS: u64 = 1;

/// Default maximum backoff for retries (30 seconds).
const DEFAULT_MAX_BACKOFF_SECS: u64 = 30;

/// Default maximum number of retry attempts on 429.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Retry behavior for rate-limited requests.
#[derive(Clone, Debug)]
struct RetryConfig {
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_secs(DEFAULT_INITIAL_BACKOFF_SECS),
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
        }
    }
}

impl RetryConfig {
    /// Backoff for a retry attempt: the Retry-After value when the endpoint
    /// sent one, otherwise exponential from the initial backoff, both capped
    /// at the maximum.
    fn calculate_backoff(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        let max_secs = self.max_backoff.as_secs();
        match retry_after {
            Some(secs) => Duration::from_secs(secs.min(max_secs)),
            None => {
                let initial = self.initial_backoff.as_secs();
                Duration::from_secs(initial.saturating_mul(1 << attempt).min(max_secs))
            }
        }
    }
}

/// Client for posting GraphQL operations to ra.co.
#[derive(Clone)]
pub struct RaClient {
    http_client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl RaClient {
    /// Creates a client against the production endpoint.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Creates a client against a custom endpoint (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            retry: RetryConfig::default(),
        }
    }

    /// Returns the endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts one GraphQL operation and returns its `data` payload.
    ///
    /// Retries on 429 with backoff, honoring the Retry-After header.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, a
    /// GraphQL-level `errors` array, or an empty `data` payload.
    pub async fn post<T, V>(&self, request: &GraphQlRequest<V>) -> Result<T>
    where
        T: DeserializeOwned,
        V: Serialize,
    {
        let mut attempt = 0;
        loop {
            let response = self
                .http_client
                .post(&self.base_url)
                .header("Referer", REFERER)
                .header("User-Agent", USER_AGENT)
                .json(request)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                // Decode in two steps so a malformed body surfaces as a
                // deserialization error rather than a transport one.
                let body = response.text().await?;
                let envelope: GraphQlResponse<T> = serde_json::from_str(&body)?;
                return match envelope.into_result() {
                    Ok(Some(data)) => Ok(data),
                    Ok(None) => Err(Error::EmptyData {
                        operation: request.operation_name.to_string(),
                    }),
                    Err(messages) => Err(Error::Graphql { messages }),
                };
            }

            if status.as_u16() == 429 {
                let retry_after = retry_after_header(&response);
                if attempt < self.retry.max_retries {
                    sleep(self.retry.calculate_backoff(attempt, retry_after)).await;
                    attempt += 1;
                    continue;
                }
                return Err(Error::RateLimit { retry_after });
            }

            let message = response.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    message
                },
            });
        }
    }
}

impl Default for RaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RaClient")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish()
    }
}

fn retry_after_header(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
}
