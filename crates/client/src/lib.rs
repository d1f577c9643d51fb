//! Session-authenticated HTTP client for Redfish services.
//!
//! The client owns transport and authentication and nothing else: it logs
//! in against the session service, attaches the token to every request,
//! retries once after a 401, and hands raw bytes upward. JSON structure is
//! the model crate's business.

pub mod config;
pub mod error;
pub mod session;

pub use config::ConnectionConfig;
pub use error::ClientError;
pub use session::{RedfishClient, Transport};
