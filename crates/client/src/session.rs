//! Session-authenticated HTTP transport.

use parking_lot::Mutex;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;

use crate::config::ConnectionConfig;
use crate::error::ClientError;

/// Where Redfish sessions are created.
const SESSIONS_PATH: &str = "/redfish/v1/SessionService/Sessions";

/// Session token header used by Redfish services.
const AUTH_HEADER: &str = "X-Auth-Token";

/// Raw transport to a Redfish service.
///
/// The cache talks to the network exclusively through this trait, which
/// keeps it testable with a canned in-memory implementation.
pub trait Transport: Send + Sync {
    /// GET a path, returning the raw response body.
    fn fetch(&self, path: &str) -> Result<Vec<u8>, ClientError>;

    /// POST a JSON body to a path, returning the response body and status.
    fn post(&self, path: &str, body: &[u8]) -> Result<(Vec<u8>, u16), ClientError>;
}

/// HTTP client holding a Redfish session.
///
/// Construction logs in; an expired session (401 on any request) triggers
/// one re-login and one retry before the failure is surfaced. The client
/// knows nothing about resources or properties; it moves bytes.
pub struct RedfishClient {
    endpoint: String,
    username: String,
    password: String,
    token: Mutex<String>,
    http: Client,
}

impl RedfishClient {
    /// Build the underlying HTTP client and authenticate a session.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let http: Client = Client::builder()
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(|e| ClientError::InvalidConfig {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        let client = Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            username: config.user.clone(),
            password: config.pass.clone(),
            token: Mutex::new(String::new()),
            http,
        };

        client.login()?;
        Ok(client)
    }

    /// POST credentials to the session service and retain the token.
    ///
    /// Some non-compliant services omit `X-Auth-Token` but do set a
    /// `Location` header for the created session; those get the marker
    /// token `"session-based"`.
    fn login(&self) -> Result<(), ClientError> {
        let url: String = join_url(&self.endpoint, SESSIONS_PATH);
        let body = serde_json::json!({
            "UserName": self.username,
            "Password": self.password,
        });

        let response: Response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| ClientError::Network {
                path: SESSIONS_PATH.to_string(),
                source: e,
            })?;

        let status: StatusCode = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(ClientError::Http {
                path: SESSIONS_PATH.to_string(),
                status: status.as_u16(),
            });
        }

        let mut token: String = response
            .headers()
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if token.is_empty() && response.headers().contains_key(reqwest::header::LOCATION) {
            token = "session-based".to_string();
        }

        *self.token.lock() = token;
        Ok(())
    }

    /// Drop the session token. Subsequent requests go out unauthenticated
    /// until the next re-login.
    pub fn logout(&self) {
        self.token.lock().clear();
    }

    fn send_get(&self, url: &str, path: &str) -> Result<Response, ClientError> {
        let mut request = self.http.get(url).header("Accept", "application/json");
        let token: String = self.token.lock().clone();
        if !token.is_empty() {
            request = request.header(AUTH_HEADER, token);
        }
        request.send().map_err(|e| ClientError::Network {
            path: path.to_string(),
            source: e,
        })
    }

    fn send_post(&self, url: &str, path: &str, body: &[u8]) -> Result<Response, ClientError> {
        let mut request = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .body(body.to_vec());
        let token: String = self.token.lock().clone();
        if !token.is_empty() {
            request = request.header(AUTH_HEADER, token);
        }
        request.send().map_err(|e| ClientError::Network {
            path: path.to_string(),
            source: e,
        })
    }

    fn read_body(response: Response, path: &str) -> Result<Vec<u8>, ClientError> {
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| ClientError::Network {
                path: path.to_string(),
                source: e,
            })
    }
}

impl Transport for RedfishClient {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        let path: String = ensure_leading_slash(path);
        let url: String = join_url(&self.endpoint, &path);

        let mut response: Response = self.send_get(&url, &path)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!("session expired, re-authenticating for {}", path);
            self.login().map_err(|_| ClientError::Http {
                path: path.clone(),
                status: StatusCode::UNAUTHORIZED.as_u16(),
            })?;
            response = self.send_get(&url, &path)?;
        }

        if response.status() != StatusCode::OK {
            return Err(ClientError::Http {
                path,
                status: response.status().as_u16(),
            });
        }

        Self::read_body(response, &path)
    }

    fn post(&self, path: &str, body: &[u8]) -> Result<(Vec<u8>, u16), ClientError> {
        let path: String = ensure_leading_slash(path);
        let url: String = join_url(&self.endpoint, &path);

        let mut response: Response = self.send_post(&url, &path, body)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!("session expired, re-authenticating for {}", path);
            self.login().map_err(|_| ClientError::Http {
                path: path.clone(),
                status: StatusCode::UNAUTHORIZED.as_u16(),
            })?;
            response = self.send_post(&url, &path, body)?;
        }

        let status: u16 = response.status().as_u16();
        if status == StatusCode::UNAUTHORIZED.as_u16() {
            // Re-login succeeded but the request is still rejected.
            return Err(ClientError::Http { path, status });
        }

        // Other non-2xx statuses are returned to the caller: action POSTs
        // legitimately answer 202, 204, or a 4xx the frontend renders.
        let data: Vec<u8> = Self::read_body(response, &path)?;
        Ok((data, status))
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn join_url(endpoint: &str, path: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), path)
}
