//! ethrpc-core — dispatch and typed decoding for Ethereum JSON-RPC.
//!
//! # Overview
//!
//! The core crate owns one call from envelope to typed value:
//!
//! - [`quantity`]: `0x`-prefixed hex quantities to and from `u64` / `BigUint`
//! - [`JsonRpcRequest`] / [`JsonRpcResponse`]: wire envelopes
//! - [`RpcTransport`] / [`RpcLogger`]: injected capabilities
//! - [`RpcClient`]: the dispatcher that sends, receives and classifies
//! - [`decode`]: payload to [`types`] records, including polymorphic blocks
//! - [`RpcError`]: transport, envelope, protocol and decode failures
//!
//! HTTP lives in `ethrpc-http`; the per-method facade lives in `ethrpc`.

pub mod decode;
pub mod dispatcher;
pub mod error;
pub mod logger;
pub mod mock;
pub mod quantity;
pub mod request;
pub mod transport;
pub mod types;

pub use dispatcher::{RpcClient, JSON_CONTENT_TYPE, REQUEST_ID};
pub use error::{DecodeError, QuantityError, RpcError, TransportError};
pub use logger::{RpcLogger, TracingLogger};
pub use mock::MockTransport;
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId, RpcParam};
pub use transport::RpcTransport;
pub use types::{
    Block, BlockHeader, BlockShape, BlockTag, BlockTransactions, FilterParams, Log, SyncProgress,
    SyncStatus, Transaction, TransactionReceipt, TransactionRequest,
};
