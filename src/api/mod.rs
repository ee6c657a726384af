//! Signed client for the gateway's direct API.

pub mod client;
pub mod orders;
pub mod transactions;

pub use client::{ApiClient, ApiResponse, IdValue, RequestEcho, ResponseStatus, OUTPUT_FORMAT};
