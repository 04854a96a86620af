use std::time::Duration;
use thiserror::Error;

/// One failed API attempt. The retry loop classifies these: transport and
/// decode problems plus rate-limit/5xx statuses are transient, everything
/// else ends the conversation and hands over to the local fallback.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: status {status}")]
    Api {
        status: u16,
        retry_after: Option<Duration>,
    },

    #[error("API returned no usable text")]
    EmptyOutput,
}

impl SummaryError {
    pub fn is_retryable(&self) -> bool {
        match self {
            SummaryError::Http(_) => true,
            SummaryError::Api { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            SummaryError::EmptyOutput => false,
        }
    }

    /// Server-provided delay hint, when the response carried one.
    pub fn retry_hint(&self) -> Option<Duration> {
        match self {
            SummaryError::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
