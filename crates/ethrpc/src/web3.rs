//! `web3_*` methods.

use ethrpc_core::{RpcClient, RpcError};

#[derive(Debug, Clone, Copy)]
pub struct Web3<'a> {
    rpc: &'a RpcClient,
}

impl<'a> Web3<'a> {
    pub(crate) fn new(rpc: &'a RpcClient) -> Self {
        Self { rpc }
    }

    /// `web3_clientVersion`
    pub async fn client_version(&self) -> Result<String, RpcError> {
        self.rpc.call("web3_clientVersion", params![]).await
    }

    /// `web3_sha3`: Keccak-256 of `data`, computed by the node.
    pub async fn sha3(&self, data: &[u8]) -> Result<String, RpcError> {
        let data = format!("0x{}", hex::encode(data));
        self.rpc.call("web3_sha3", params![data]).await
    }
}
