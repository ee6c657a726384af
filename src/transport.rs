//! HTTP transport abstraction.
//!
//! The request engine talks to the network through [`HttpTransport`], a
//! single-operation trait. The concrete implementation is chosen by the
//! caller at client construction; [`ReqwestTransport`] is the default.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::{Error, Result};

/// Per-request ceiling for one round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(80);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP methods the request engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Parse a caller-supplied method name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "get" => Some(Method::Get),
            "post" => Some(Method::Post),
            "put" => Some(Method::Put),
            "delete" => Some(Method::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether the method carries a form-encoded body.
    pub fn has_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

/// A pluggable HTTP transport.
///
/// Implementations perform exactly one request and return the raw body and
/// status code. Transport-level failures (connect errors, timeouts,
/// unreadable bodies) become [`Error::Connection`]; HTTP error responses
/// that carry a body are returned as-is, so classification stays with the
/// request engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn perform(
        &self,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<String>,
    ) -> Result<(String, u16)>;
}

/// Default transport backed by [`reqwest`].
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn perform(
        &self,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<String>,
    ) -> Result<(String, u16)> {
        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };

        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| Error::Connection {
            message: format!("error communicating with the gateway: {e}"),
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| Error::Connection {
            message: format!("error reading gateway response: {e}"),
        })?;

        Ok((body, status))
    }
}
