use reqwest::StatusCode;
use thiserror::Error as ThisError;

/// Failure talking to the remote content store.
#[derive(Debug, ThisError)]
pub enum StoreError {
    /// Upstream answered with a non-success status.
    #[error("Upstream returned {status}: {body:.200}")]
    Status {
        status: StatusCode,
        /// Raw upstream body, kept for diagnostics and user messages.
        body: String,
    },

    /// Transport-level failure (DNS, connect, timeouts, etc).
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Success status with a body we could not make sense of.
    #[error("Unexpected upstream payload: {0}")]
    Payload(String),
}

impl StoreError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            StoreError::Reqwest(e) => e.status(),
            StoreError::Payload(_) => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Payload(e.to_string())
    }
}
