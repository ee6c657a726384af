//! Rust client bindings for the Paylio payment gateway.
//!
//! Two independent surfaces:
//!
//! - [`ApiClient`] — signed server-to-server calls for transaction
//!   operations (refund, mark-shipped, confirm-delivery).
//! - [`Gateway`] — hosted-payment-page checkout: builds the signed
//!   redirect form and verifies inbound callback checksums.
//!
//! # Example
//!
//! ```no_run
//! use paylio::{ApiClient, Config};
//!
//! # async fn run() -> paylio::Result<()> {
//! let config = Config::new(1000, "your_secret");
//! let client = ApiClient::new(config);
//!
//! let result = client.refund(10000, 100, "EUR").await?;
//! if let Some(response) = result.response {
//!     println!("code {}: {:?}", response.code, response.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod signing;
pub mod transport;

pub use api::{ApiClient, ApiResponse, IdValue, RequestEcho, ResponseStatus};
pub use config::{Config, Environment};
pub use error::{Error, Result};
pub use gateway::{Gateway, RedirectForm};
pub use transport::{HttpTransport, Method, ReqwestTransport};
