//! Error types for the Resident Advisor GraphQL client.

use thiserror::Error;

/// A specialized Result type for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the upstream GraphQL endpoint.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status from the endpoint.
    #[error("HTTP error {status}: {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The response body, or the canonical status reason.
        message: String,
    },

    /// Rate limit exceeded and retries exhausted.
    #[error("rate limited{}", retry_after.map(|s| format!(", retry after {s}s")).unwrap_or_default())]
    RateLimit {
        /// Value of the Retry-After header, if present.
        retry_after: Option<u64>,
    },

    /// The response was 200 but carried GraphQL-level errors.
    #[error("GraphQL errors: {}", messages.join("; "))]
    Graphql {
        /// The upstream error messages.
        messages: Vec<String>,
    },

    /// The response body could not be deserialized.
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The response carried no data for the requested operation.
    #[error("empty response for operation {operation}")]
    EmptyData {
        /// The GraphQL operation name.
        operation: String,
    },
}

impl Error {
    /// Returns true if retrying the request could help.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimit { .. } | Error::Network(_))
    }

    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Network(_) => 3,
            Error::RateLimit { .. } => 4,
            _ => 2,
        }
    }
}
