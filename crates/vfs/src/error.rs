//! The unified error surface of the VFS.

use thiserror::Error;

use redfish_vfs_client::ClientError;
use redfish_vfs_model::ParseError;

/// Everything that can go wrong at the VFS boundary.
///
/// Each variant is one discriminable failure kind; frontends match on the
/// variant to decide how to present it. The core never recovers silently;
/// the client's single re-login and the per-entry skip during cache load
/// are the only internal retries.
#[derive(Debug, Error)]
pub enum VfsError {
    /// A path segment matched nothing, or the service answered 404.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// Cache miss with no transport attached.
    #[error("not cached (offline mode): {path}")]
    NotCached { path: String },

    /// Transport failure: DNS, connection refused, TLS handshake.
    #[error("network error: {path}: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response. A 401 here means re-authentication failed too.
    #[error("HTTP {status}: {path}")]
    Http { path: String, status: u16 },

    /// The service returned a body the JSON decoder rejected. The entry is
    /// not cached.
    #[error("parse error: {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    /// Malformed segment or a path outside the Redfish root.
    #[error("invalid path: {path}")]
    InvalidPath { path: String },

    /// Construction-time configuration problem.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Cache file I/O failure during save or load.
    #[error("cache file error: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<ClientError> for VfsError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Network { path, source } => VfsError::Network { path, source },
            ClientError::Http { path, status: 404 } => VfsError::NotFound { path },
            ClientError::Http { path, status } => VfsError::Http { path, status },
            ClientError::InvalidConfig { message } => VfsError::Config { message },
        }
    }
}
