//! `net_*` methods.

use ethrpc_core::{decode, RpcClient, RpcError};

#[derive(Debug, Clone, Copy)]
pub struct Net<'a> {
    rpc: &'a RpcClient,
}

impl<'a> Net<'a> {
    pub(crate) fn new(rpc: &'a RpcClient) -> Self {
        Self { rpc }
    }

    /// `net_version`: the network id, as the node reports it.
    pub async fn version(&self) -> Result<String, RpcError> {
        self.rpc.call("net_version", params![]).await
    }

    /// `net_listening`
    pub async fn listening(&self) -> Result<bool, RpcError> {
        self.rpc.call("net_listening", params![]).await
    }

    /// `net_peerCount`
    pub async fn peer_count(&self) -> Result<u64, RpcError> {
        let payload = self.rpc.dispatch("net_peerCount", params![]).await?;
        Ok(decode::quantity(payload)?)
    }
}
