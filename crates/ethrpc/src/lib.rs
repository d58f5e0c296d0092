//! ethrpc — typed Ethereum JSON-RPC client.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use ethrpc::{BlockTag, EthRpc};
//!
//! # async fn run() -> Result<(), ethrpc::RpcError> {
//! let client = EthRpc::new("http://127.0.0.1:8545")?;
//! let head = client.eth().block_number().await?;
//! let balance = client
//!     .eth()
//!     .get_balance("0x407d73d8a49eeb85d32cf465507dd71d507100c1", BlockTag::Latest)
//!     .await?;
//! println!("block {head}, balance {balance} wei");
//! # Ok(())
//! # }
//! ```
//!
//! One method per remote procedure, grouped by namespace: [`EthRpc::web3`],
//! [`EthRpc::net`], [`EthRpc::eth`], [`EthRpc::personal`]. Anything not in
//! the catalogue goes through [`EthRpc::dispatch`] or [`EthRpc::call`].

macro_rules! params {
    () => {
        Vec::new()
    };
    ($($p:expr),+ $(,)?) => {
        vec![$($crate::client::param(&$p)?),+]
    };
}

pub mod client;
pub mod eth;
pub mod net;
pub mod personal;
pub mod web3;

pub use client::{EthRpc, EthRpcBuilder};
pub use eth::Eth;
pub use net::Net;
pub use personal::Personal;
pub use web3::Web3;

pub use ethrpc_core::quantity::{eth1, WEI_PER_ETHER};
pub use ethrpc_core::{
    Block, BlockHeader, BlockShape, BlockTag, BlockTransactions, DecodeError, FilterParams,
    JsonRpcError, Log, QuantityError, RpcClient, RpcError, RpcLogger, RpcTransport, SyncProgress,
    SyncStatus, TracingLogger, Transaction, TransactionReceipt, TransactionRequest,
    TransportError,
};
pub use ethrpc_http::{HttpTransport, HttpTransportConfig};
pub use num_bigint::BigUint;
