//! Connection configuration.

use serde::Deserialize;

use crate::error::ClientError;

/// Connection settings for a Redfish endpoint.
///
/// Frontends own the file format (YAML, flags, environment); this is the
/// record they hand to the core. `endpoint`, `user`, and `pass` are
/// required; unknown options are rejected at deserialization time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Base URL: scheme, host, optional port. No trailing path.
    #[serde(default)]
    pub endpoint: String,
    /// Session username.
    #[serde(default)]
    pub user: String,
    /// Session password.
    #[serde(default)]
    pub pass: String,
    /// Disable TLS certificate verification. Needed for the self-signed
    /// certificates most BMCs ship with.
    #[serde(default)]
    pub insecure: bool,
}

impl ConnectionConfig {
    pub fn new(
        endpoint: impl Into<String>,
        user: impl Into<String>,
        pass: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            user: user.into(),
            pass: pass.into(),
            insecure: false,
        }
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Check that all required fields are present and the endpoint is a
    /// well-formed URL.
    pub fn validate(&self) -> Result<(), ClientError> {
        for (field, value) in [
            ("endpoint", &self.endpoint),
            ("user", &self.user),
            ("pass", &self.pass),
        ] {
            if value.is_empty() {
                return Err(ClientError::InvalidConfig {
                    message: format!("missing required field: {}", field),
                });
            }
        }

        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| ClientError::InvalidConfig {
            message: format!("invalid endpoint {:?}: {}", self.endpoint, e),
        })?;
        if url.host_str().is_none() {
            return Err(ClientError::InvalidConfig {
                message: format!("endpoint {:?} has no host", self.endpoint),
            });
        }

        Ok(())
    }

    /// Endpoint host name, for deriving per-host file names.
    pub fn host(&self) -> Option<String> {
        let url = reqwest::Url::parse(&self.endpoint).ok()?;
        url.host_str().map(str::to_string)
    }
}
