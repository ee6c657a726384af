//! Request/response engine for the gateway's direct API.
//!
//! [`ApiClient`] builds signed requests, dispatches them through the bound
//! transport, decodes the generic response envelope, and maps status codes
//! and error payloads onto the crate's error taxonomy. Resource operations
//! live in the sibling `transactions` and `orders` modules as `impl` blocks
//! on the client.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::signing;
use crate::transport::{HttpTransport, Method, ReqwestTransport};
use crate::{Error, Result};

/// The only response serialization the binding supports.
pub const OUTPUT_FORMAT: &str = "json";

/// Bindings version reported to the gateway.
const BINDINGS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client for the direct (server-to-server) gateway API.
///
/// Construct once with a [`Config`] and reuse it across calls. The bound
/// transport is chosen at construction; [`ApiClient::new`] picks the
/// default [`ReqwestTransport`].
#[derive(Clone)]
pub struct ApiClient {
    config: Config,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    /// Create a client with the default transport.
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client with a caller-chosen transport.
    pub fn with_transport(config: Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a request to the gateway API and decode the response envelope.
    ///
    /// `data` is form-encoded into the body for `post`/`put` and ignored
    /// for `get`/`delete`; any other method name fails with
    /// [`Error::Connection`]. Caller-supplied `headers` are merged after
    /// the fixed client headers and win on collision.
    ///
    /// Success requires a decodable `api` envelope and a status in
    /// `200..=299`; 300 and above is classified as a failure (the upstream
    /// contract is ambiguous at exactly 300, so the stricter reading is
    /// used). Status 400 and 401 become [`Error::InvalidRequest`], every
    /// other out-of-range status a generic [`Error::Api`].
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        data: &[(&str, String)],
        extra_headers: Option<HashMap<String, String>>,
    ) -> Result<ApiResponse> {
        let parsed = Method::parse(method).ok_or_else(|| Error::Connection {
            message: format!(
                "Unrecognized HTTP method {method}. This may indicate a bug in the Paylio Rust bindings."
            ),
        })?;

        let url = format!("{}{}", self.config.api_base, path);

        let body = if parsed.has_body() {
            let encoded = serde_urlencoded::to_string(data).map_err(|e| Error::Connection {
                message: format!("failed to encode form body: {e}"),
            })?;
            Some(encoded)
        } else {
            None
        };

        let mut headers = self.default_headers(parsed);
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        debug!(method = parsed.as_str(), url = %url, body = ?body, "dispatching API request");

        let (response, status) = self.transport.perform(parsed, &url, &headers, body).await?;

        info!(
            method = parsed.as_str(),
            url = %url,
            status,
            response = %response,
            "API call completed"
        );

        decode_response(&response, status)
    }

    fn default_headers(&self, method: Method) -> HashMap<String, String> {
        let client_info = serde_json::json!({
            "bindings_version": BINDINGS_VERSION,
            "lang": "Rust",
            "platform": format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
        });

        let mut headers = HashMap::new();
        headers.insert(
            "X-Paylio-Client-User-Agent".to_string(),
            client_info.to_string(),
        );
        headers.insert(
            "User-Agent".to_string(),
            format!("Paylio/v1 RustBinding/{BINDINGS_VERSION}"),
        );
        if method == Method::Post {
            headers.insert(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            );
        }

        headers
    }

    /// Sign `command` and POST the standard five-field form to `path`.
    pub(crate) async fn execute_command(
        &self,
        path: &str,
        transaction_id: &str,
        command: &str,
    ) -> Result<ApiResponse> {
        let checksum = signing::sign_request(
            self.config.site_id,
            transaction_id,
            command,
            OUTPUT_FORMAT,
            &self.config.secret,
        );

        let data = [
            ("command", command.to_string()),
            ("output_type", OUTPUT_FORMAT.to_string()),
            ("site_id", self.config.site_id.to_string()),
            ("transaction_id", transaction_id.to_string()),
            ("checksum", checksum),
        ];

        self.request("post", path, &data, None).await
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Transaction/order id as echoed by the gateway: number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Int(i64),
    Str(String),
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdValue::Int(id) => write!(f, "{id}"),
            IdValue::Str(id) => f.write_str(id),
        }
    }
}

/// Echo of the request the gateway acted on.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEcho {
    pub command: Option<String>,
    pub site_id: Option<i64>,
    pub transaction_id: Option<IdValue>,
    /// Any additional keys the gateway echoes back.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Outcome the gateway reports for the request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseStatus {
    pub code: i64,
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Decoded success envelope (the `api` payload) of a gateway response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub request: Option<RequestEcho>,
    pub response: Option<ResponseStatus>,
    /// Keys outside the documented envelope, kept accessible by name.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "errorSubject", default)]
    subject: String,
    #[serde(rename = "errorDetail", default)]
    detail: String,
}

fn decode_response(body: &str, status: u16) -> Result<ApiResponse> {
    let value: Option<Value> = serde_json::from_str(body).ok();

    let decoded = value
        .as_ref()
        .and_then(|v| v.get("api"))
        .and_then(|api| serde_json::from_value::<ApiResponse>(api.clone()).ok());

    let decoded = match decoded {
        Some(decoded) => decoded,
        None => {
            // No usable `api` payload: surface the error envelope if the
            // gateway sent a non-empty one.
            let error = value.as_ref().and_then(|v| v.get("error"));
            if let Some(error) = error.filter(|e| e.as_object().is_some_and(|o| !o.is_empty())) {
                let detail: ErrorDetail =
                    serde_json::from_value(error.clone()).unwrap_or_default();
                return Err(Error::Api {
                    message: format!("{}. {}", detail.subject, detail.detail),
                    body: Some(body.to_string()),
                    status: Some(status),
                });
            }
            return Err(Error::Api {
                message: "Invalid response object from API".to_string(),
                body: Some(body.to_string()),
                status: Some(status),
            });
        }
    };

    if !(200..300).contains(&status) {
        return Err(classify_status(body, status));
    }

    Ok(decoded)
}

fn classify_status(body: &str, status: u16) -> Error {
    match status {
        400 | 401 => Error::InvalidRequest {
            message: "Invalid request error".to_string(),
            body: body.to_string(),
            status,
        },
        _ => Error::Api {
            message: "API request error".to_string(),
            body: Some(body.to_string()),
            status: Some(status),
        },
    }
}
