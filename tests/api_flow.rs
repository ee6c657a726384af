//! End-to-end API flow against an injected transport, exercising the
//! public trait surface the way an embedding application would.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use paylio::{ApiClient, Config, Error, HttpTransport, Method, Result};

/// Transport double that returns a canned response and records the request.
struct StaticTransport {
    body: String,
    status: u16,
    seen: Mutex<Vec<(Method, String, Option<String>)>>,
}

impl StaticTransport {
    fn new(body: &str, status: u16) -> Self {
        Self {
            body: body.to_string(),
            status,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HttpTransport for StaticTransport {
    async fn perform(
        &self,
        method: Method,
        url: &str,
        _headers: &HashMap<String, String>,
        body: Option<String>,
    ) -> Result<(String, u16)> {
        self.seen
            .lock()
            .unwrap()
            .push((method, url.to_string(), body));
        Ok((self.body.clone(), self.status))
    }
}

#[tokio::test]
async fn test_refund_through_injected_transport() {
    let transport = std::sync::Arc::new(StaticTransport::new(
        r#"{"api":{"request":{"command":"EUR2098","site_id":77,"transaction_id":42},
            "response":{"code":200,"message":"Refund successful"}}}"#,
        200,
    ));
    let config = Config::new(77, "s3cr3t").with_api_base("https://gateway.paylio.test/api");
    let client = ApiClient::with_transport(config, transport.clone());

    let result = client.refund(42, 2098, "EUR").await.unwrap();
    assert_eq!(result.response.unwrap().code, 200);

    let seen = transport.seen.lock().unwrap();
    let (method, url, body) = &seen[0];
    assert_eq!(*method, Method::Post);
    assert_eq!(url, "https://gateway.paylio.test/api/RefundTransaction");

    let fields: HashMap<String, String> =
        serde_urlencoded::from_str(body.as_deref().unwrap()).unwrap();
    assert_eq!(fields.get("command").map(String::as_str), Some("EUR2098"));
    assert_eq!(fields.get("site_id").map(String::as_str), Some("77"));
    assert_eq!(fields.get("output_type").map(String::as_str), Some("json"));
    assert!(fields.contains_key("checksum"));
}

#[tokio::test]
async fn test_transport_failure_surfaces_as_connection_error() {
    struct FailingTransport;

    #[async_trait]
    impl HttpTransport for FailingTransport {
        async fn perform(
            &self,
            _method: Method,
            _url: &str,
            _headers: &HashMap<String, String>,
            _body: Option<String>,
        ) -> Result<(String, u16)> {
            Err(Error::Connection {
                message: "connection refused".to_string(),
            })
        }
    }

    let config = Config::new(77, "s3cr3t");
    let client = ApiClient::with_transport(config, std::sync::Arc::new(FailingTransport));

    let err = client.mark_shipped(42, "DHL", 123456).await.unwrap_err();
    assert!(matches!(err, Error::Connection { .. }));
}
