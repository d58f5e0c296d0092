//! ethrpc-http — HTTP transport for the ethrpc dispatcher, backed by `reqwest`.
//!
//! Posts one request body per call and hands the raw reply body back. The
//! transport never retries; the dispatcher decides what the body means.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
