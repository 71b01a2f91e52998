//! Transport-level failures surfaced by the resource client.

use thiserror::Error;

/// Errors that can occur while talking to a REST resource.
///
/// The client never retries and never interprets status codes beyond
/// success/failure; these errors reach the store operation unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Connection refused, DNS failure, timeout, or other network failure.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON shape the caller expected.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Build(String),
}

impl ClientError {
    /// Human-readable message carried by this failure, if any.
    pub fn message(&self) -> Option<String> {
        let message = self.to_string();
        if message.trim().is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
