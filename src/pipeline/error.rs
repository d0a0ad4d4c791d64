//! Fetch error types
//!
//! Every failure while reading the reporting API collapses into one of
//! these variants. The dashboard only ever shows the rendered message, but
//! the variants keep the cause visible in logs.

use thiserror::Error;

use crate::pipeline::types::Endpoint;

/// Errors that can occur while fetching a pipeline dataset
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// The backend could not be reached
    #[error("Failed to reach {endpoint}: {source}")]
    Connect {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the configured timeout
    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: Endpoint },

    /// The backend answered with a non-2xx status
    #[error("Request to {endpoint} failed with status {status}: {message}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        message: String,
    },

    /// The response body was not the expected JSON
    #[error("Invalid response from {endpoint}: {message}")]
    Decode { endpoint: Endpoint, message: String },
}

impl FetchError {
    /// Classify a transport error the way the client reports it
    pub(crate) fn from_transport(endpoint: Endpoint, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout { endpoint }
        } else {
            FetchError::Connect {
                endpoint,
                source: err,
            }
        }
    }

    /// The endpoint that failed, if the error is tied to one
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            FetchError::Client(_) => None,
            FetchError::Connect { endpoint, .. }
            | FetchError::Timeout { endpoint }
            | FetchError::Status { endpoint, .. }
            | FetchError::Decode { endpoint, .. } => Some(*endpoint),
        }
    }
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
