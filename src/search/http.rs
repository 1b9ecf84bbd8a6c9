use std::time::Duration;

use crate::error::{Result, WsAuditError};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("ws-audit/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed HTTP exchange.
///
/// Non-success statuses are returned as values, not errors; the caller
/// decides whether a status means "retry", "stop" or "parse".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// HTTP client abstraction for dependency injection.
pub trait HttpClient: Send + Sync {
    /// Perform a GET request with the given headers.
    ///
    /// # Errors
    /// Returns an error only when no response was received at all
    /// (connection failure, timeout, unreadable body).
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse>;
}

/// Production HTTP client using reqwest.
///
/// This implementation cannot be unit tested without a real HTTP server,
/// so it is excluded from coverage measurement.
#[derive(Debug)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Build a blocking client with the default timeout and user agent.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WsAuditError::Http(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[cfg(not(tarpaulin_include))]
impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                WsAuditError::Http(format!("Request timeout fetching {url}"))
            } else if e.is_connect() {
                WsAuditError::Http(format!("Failed to connect to {url}"))
            } else {
                WsAuditError::Http(format!("Failed to fetch {url}: {e}"))
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| WsAuditError::Http(format!("Failed to read response from {url}: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}
