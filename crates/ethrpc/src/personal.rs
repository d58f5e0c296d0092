//! `personal_*` methods: node-side key management.
//!
//! Passphrases travel in the request body. Use these only against a node you
//! control over a trusted channel.

use ethrpc_core::{decode, RpcClient, RpcError, TransactionRequest};

#[derive(Debug, Clone, Copy)]
pub struct Personal<'a> {
    rpc: &'a RpcClient,
}

impl<'a> Personal<'a> {
    pub(crate) fn new(rpc: &'a RpcClient) -> Self {
        Self { rpc }
    }

    /// `personal_listAccounts`
    pub async fn list_accounts(&self) -> Result<Vec<String>, RpcError> {
        let payload = self.rpc.dispatch("personal_listAccounts", params![]).await?;
        Ok(decode::list(payload)?)
    }

    /// `personal_newAccount`: returns the new address.
    pub async fn new_account(&self, passphrase: &str) -> Result<String, RpcError> {
        self.rpc.call("personal_newAccount", params![passphrase]).await
    }

    /// `personal_unlockAccount`. `None` leaves the unlock duration to the
    /// node's default.
    pub async fn unlock_account(
        &self,
        address: &str,
        passphrase: &str,
        duration_secs: Option<u64>,
    ) -> Result<bool, RpcError> {
        let params = match duration_secs {
            Some(secs) => params![address, passphrase, secs],
            None => params![address, passphrase],
        };
        self.rpc.call("personal_unlockAccount", params).await
    }

    /// `personal_sendTransaction`: returns the transaction hash.
    pub async fn send_transaction(
        &self,
        tx: &TransactionRequest,
        passphrase: &str,
    ) -> Result<String, RpcError> {
        self.rpc
            .call("personal_sendTransaction", params![tx, passphrase])
            .await
    }

    /// `personal_sign`
    pub async fn sign(&self, data: &str, address: &str, passphrase: &str) -> Result<String, RpcError> {
        self.rpc
            .call("personal_sign", params![data, address, passphrase])
            .await
    }

    /// `personal_ecRecover`: the address that produced `signature` over `data`.
    pub async fn ec_recover(&self, data: &str, signature: &str) -> Result<String, RpcError> {
        self.rpc
            .call("personal_ecRecover", params![data, signature])
            .await
    }
}
