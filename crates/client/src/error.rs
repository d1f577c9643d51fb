//! Error types for transport and authentication.

use thiserror::Error;

/// Errors surfaced by the HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("network error: {path}: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status}: {path}")]
    Http { path: String, status: u16 },
}
