//! Test-execution client errors

use thiserror::Error;

/// Failure to get a [`RunResponse`](crate::RunResponse) from the service
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Base URL could not be parsed or joined
    #[error("invalid service URL `{url}`: {message}")]
    InvalidUrl {
        /// URL as given
        url: String,
        /// Parser message
        message: String,
    },

    /// Connection, timeout or other transport failure
    #[error("request to {url} failed")]
    Transport {
        /// Endpoint URL
        url: String,
        /// Underlying error
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status
    #[error("service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// The service refused the request's `Host` header
    #[error("service rejected the request host: {0}")]
    HostRejected(String),

    /// The response body was not a valid response document
    #[error("undecodable service response: {body}")]
    Decode {
        /// Response body text
        body: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for runner operations
pub type Result<T> = std::result::Result<T, RunnerError>;
