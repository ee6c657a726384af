//! Error types for the Paylio client bindings.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure, or an HTTP method the engine does not know.
    #[error("connection error: {message}")]
    Connection { message: String },

    /// Malformed or erroneous API response, or a non-2xx status outside the
    /// invalid-request codes.
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Raw response body, when one was received.
        body: Option<String>,
        /// HTTP status code, when one was received.
        status: Option<u16>,
    },

    /// The gateway rejected the request as defective (HTTP 400 or 401).
    #[error("invalid request: {message}")]
    InvalidRequest {
        message: String,
        /// Raw response body.
        body: String,
        /// HTTP status code.
        status: u16,
    },

    /// Bad caller input, detected before any network activity.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A field required for checksum computation is absent.
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    /// Client configuration problem.
    #[error("configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
