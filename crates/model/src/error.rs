//! Error types for resource parsing.

use thiserror::Error;

/// Errors that can occur while parsing a Redfish payload.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("top-level JSON value is not an object")]
    NotAnObject,
}
