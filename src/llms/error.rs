//! Backend call errors.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while calling a text-generation backend.
///
/// Every variant is treated the same way by the gateway (the request is
/// answered from the fallback table), but the variants keep the log lines
/// specific.
#[derive(Debug, Error)]
pub enum LLMError {
    /// No credential configured for the backend.
    #[error("API key not set")]
    MissingApiKey,

    /// Transport-level failure (DNS, connect, TLS, body read).
    ///
    /// The request URL is stripped before the error is stored.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The backend answered 200 with an `error` object.
    #[error("API error: {0}")]
    Api(String),

    /// The response carried no usable text.
    #[error("No text in response")]
    EmptyResponse,

    /// The response body was not valid JSON.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The call did not complete within the configured bound.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}
