use thiserror::Error;

/// Failures raised while relaying a request to the GC2 backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The upload body was missing its `file` field or the data URL was malformed.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The upstream answered with a non-success status.
    #[error("HTTP error! status: {status}, body: {body}")]
    Upstream { status: u16, body: String },

    /// The upstream could not be reached at all.
    #[error("Network failure: {0}")]
    NetworkFailure(String),
}

impl RelayError {
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            tracing::warn!(reqwest_timeout = %err);
            RelayError::NetworkFailure("Request timeout".into())
        } else if err.is_connect() {
            tracing::warn!(reqwest_connect = %err);
            RelayError::NetworkFailure("Connection failed".into())
        } else {
            tracing::error!(reqwest_error = %err);
            RelayError::NetworkFailure(err.to_string())
        }
    }
}
