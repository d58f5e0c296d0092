//! `eth_*` methods.

use num_bigint::BigUint;
use serde::de::DeserializeOwned;

use ethrpc_core::quantity::int_to_hex;
use ethrpc_core::{
    decode, Block, BlockShape, BlockTag, FilterParams, Log, RpcClient, RpcError, RpcParam,
    SyncStatus, Transaction, TransactionReceipt, TransactionRequest,
};

#[derive(Debug, Clone, Copy)]
pub struct Eth<'a> {
    rpc: &'a RpcClient,
}

impl<'a> Eth<'a> {
    pub(crate) fn new(rpc: &'a RpcClient) -> Self {
        Self { rpc }
    }

    // ─── Node state ───────────────────────────────────────────────────────────

    /// `eth_protocolVersion`
    pub async fn protocol_version(&self) -> Result<String, RpcError> {
        self.rpc.call("eth_protocolVersion", params![]).await
    }

    /// `eth_syncing`
    pub async fn syncing(&self) -> Result<SyncStatus, RpcError> {
        let payload = self.rpc.dispatch("eth_syncing", params![]).await?;
        Ok(decode::sync_status(payload)?)
    }

    /// `eth_coinbase`
    pub async fn coinbase(&self) -> Result<String, RpcError> {
        self.rpc.call("eth_coinbase", params![]).await
    }

    /// `eth_mining`
    pub async fn mining(&self) -> Result<bool, RpcError> {
        self.rpc.call("eth_mining", params![]).await
    }

    /// `eth_hashrate`: hashes per second.
    pub async fn hashrate(&self) -> Result<u64, RpcError> {
        self.quantity("eth_hashrate", params![]).await
    }

    /// `eth_gasPrice`, in wei.
    pub async fn gas_price(&self) -> Result<BigUint, RpcError> {
        let payload = self.rpc.dispatch("eth_gasPrice", params![]).await?;
        Ok(decode::big_quantity(payload)?)
    }

    /// `eth_accounts`
    pub async fn accounts(&self) -> Result<Vec<String>, RpcError> {
        let payload = self.rpc.dispatch("eth_accounts", params![]).await?;
        Ok(decode::list(payload)?)
    }

    /// `eth_blockNumber`
    pub async fn block_number(&self) -> Result<u64, RpcError> {
        self.quantity("eth_blockNumber", params![]).await
    }

    // ─── Account state ────────────────────────────────────────────────────────

    /// `eth_getBalance`, in wei.
    pub async fn get_balance(&self, address: &str, block: BlockTag) -> Result<BigUint, RpcError> {
        let payload = self
            .rpc
            .dispatch("eth_getBalance", params![address, block])
            .await?;
        Ok(decode::big_quantity(payload)?)
    }

    /// `eth_getStorageAt`: the 32-byte word at `position`.
    pub async fn get_storage_at(
        &self,
        address: &str,
        position: u64,
        block: BlockTag,
    ) -> Result<String, RpcError> {
        self.rpc
            .call("eth_getStorageAt", params![address, int_to_hex(position), block])
            .await
    }

    /// `eth_getTransactionCount`: the account nonce.
    pub async fn get_transaction_count(
        &self,
        address: &str,
        block: BlockTag,
    ) -> Result<u64, RpcError> {
        self.quantity("eth_getTransactionCount", params![address, block])
            .await
    }

    /// `eth_getCode`
    pub async fn get_code(&self, address: &str, block: BlockTag) -> Result<String, RpcError> {
        self.rpc.call("eth_getCode", params![address, block]).await
    }

    // ─── Block counts ─────────────────────────────────────────────────────────

    /// `eth_getBlockTransactionCountByHash`
    pub async fn get_block_transaction_count_by_hash(&self, hash: &str) -> Result<u64, RpcError> {
        self.quantity("eth_getBlockTransactionCountByHash", params![hash])
            .await
    }

    /// `eth_getBlockTransactionCountByNumber`
    pub async fn get_block_transaction_count_by_number(
        &self,
        number: u64,
    ) -> Result<u64, RpcError> {
        self.quantity(
            "eth_getBlockTransactionCountByNumber",
            params![int_to_hex(number)],
        )
        .await
    }

    /// `eth_getUncleCountByBlockHash`
    pub async fn get_uncle_count_by_block_hash(&self, hash: &str) -> Result<u64, RpcError> {
        self.quantity("eth_getUncleCountByBlockHash", params![hash])
            .await
    }

    /// `eth_getUncleCountByBlockNumber`
    pub async fn get_uncle_count_by_block_number(&self, number: u64) -> Result<u64, RpcError> {
        self.quantity("eth_getUncleCountByBlockNumber", params![int_to_hex(number)])
            .await
    }

    // ─── Signing and submission ───────────────────────────────────────────────

    /// `eth_sign`
    pub async fn sign(&self, address: &str, data: &str) -> Result<String, RpcError> {
        self.rpc.call("eth_sign", params![address, data]).await
    }

    /// `eth_sendTransaction`: returns the transaction hash.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String, RpcError> {
        self.rpc.call("eth_sendTransaction", params![tx]).await
    }

    /// `eth_sendRawTransaction`: `data` is the signed transaction, hex encoded.
    pub async fn send_raw_transaction(&self, data: &str) -> Result<String, RpcError> {
        self.rpc.call("eth_sendRawTransaction", params![data]).await
    }

    /// `eth_call`: execute without creating a transaction; returns the
    /// return data.
    pub async fn call(&self, tx: &TransactionRequest, block: BlockTag) -> Result<String, RpcError> {
        self.rpc.call("eth_call", params![tx, block]).await
    }

    /// `eth_estimateGas`
    pub async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, RpcError> {
        self.quantity("eth_estimateGas", params![tx]).await
    }

    // ─── Blocks and transactions ──────────────────────────────────────────────

    /// `eth_getBlockByHash`. With `with_transactions` the block carries full
    /// transaction records, otherwise their hashes. `None` if unknown.
    pub async fn get_block_by_hash(
        &self,
        hash: &str,
        with_transactions: bool,
    ) -> Result<Option<Block>, RpcError> {
        let payload = self
            .rpc
            .dispatch("eth_getBlockByHash", params![hash, with_transactions])
            .await?;
        Ok(decode::block(payload, BlockShape::from_flag(with_transactions))?)
    }

    /// `eth_getBlockByNumber`. See [`Eth::get_block_by_hash`].
    pub async fn get_block_by_number(
        &self,
        number: u64,
        with_transactions: bool,
    ) -> Result<Option<Block>, RpcError> {
        let payload = self
            .rpc
            .dispatch(
                "eth_getBlockByNumber",
                params![int_to_hex(number), with_transactions],
            )
            .await?;
        Ok(decode::block(payload, BlockShape::from_flag(with_transactions))?)
    }

    /// `eth_getTransactionByHash`
    pub async fn get_transaction_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<Transaction>, RpcError> {
        self.optional("eth_getTransactionByHash", params![hash]).await
    }

    /// `eth_getTransactionByBlockHashAndIndex`
    pub async fn get_transaction_by_block_hash_and_index(
        &self,
        hash: &str,
        index: u64,
    ) -> Result<Option<Transaction>, RpcError> {
        self.optional(
            "eth_getTransactionByBlockHashAndIndex",
            params![hash, int_to_hex(index)],
        )
        .await
    }

    /// `eth_getTransactionByBlockNumberAndIndex`
    pub async fn get_transaction_by_block_number_and_index(
        &self,
        number: u64,
        index: u64,
    ) -> Result<Option<Transaction>, RpcError> {
        self.optional(
            "eth_getTransactionByBlockNumberAndIndex",
            params![int_to_hex(number), int_to_hex(index)],
        )
        .await
    }

    /// `eth_getTransactionReceipt`. `None` while the transaction is pending.
    pub async fn get_transaction_receipt(
        &self,
        hash: &str,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        self.optional("eth_getTransactionReceipt", params![hash]).await
    }

    /// `eth_getCompilers`
    pub async fn get_compilers(&self) -> Result<Vec<String>, RpcError> {
        let payload = self.rpc.dispatch("eth_getCompilers", params![]).await?;
        Ok(decode::list(payload)?)
    }

    // ─── Filters and logs ─────────────────────────────────────────────────────

    /// `eth_newFilter`: returns the filter id.
    pub async fn new_filter(&self, filter: &FilterParams) -> Result<String, RpcError> {
        self.rpc.call("eth_newFilter", params![filter]).await
    }

    /// `eth_newBlockFilter`
    pub async fn new_block_filter(&self) -> Result<String, RpcError> {
        self.rpc.call("eth_newBlockFilter", params![]).await
    }

    /// `eth_newPendingTransactionFilter`
    pub async fn new_pending_transaction_filter(&self) -> Result<String, RpcError> {
        self.rpc
            .call("eth_newPendingTransactionFilter", params![])
            .await
    }

    /// `eth_uninstallFilter`: `false` if the node did not know the filter.
    pub async fn uninstall_filter(&self, filter_id: &str) -> Result<bool, RpcError> {
        self.rpc.call("eth_uninstallFilter", params![filter_id]).await
    }

    /// `eth_getFilterChanges` for a log filter: logs since the last poll.
    pub async fn get_filter_changes(&self, filter_id: &str) -> Result<Vec<Log>, RpcError> {
        self.logs("eth_getFilterChanges", params![filter_id]).await
    }

    /// `eth_getFilterChanges` for a block or pending-transaction filter:
    /// block or transaction hashes since the last poll.
    pub async fn get_filter_change_hashes(&self, filter_id: &str) -> Result<Vec<String>, RpcError> {
        let payload = self
            .rpc
            .dispatch("eth_getFilterChanges", params![filter_id])
            .await?;
        Ok(decode::list(payload)?)
    }

    /// `eth_getFilterLogs`: every log matching a log filter.
    pub async fn get_filter_logs(&self, filter_id: &str) -> Result<Vec<Log>, RpcError> {
        self.logs("eth_getFilterLogs", params![filter_id]).await
    }

    /// `eth_getLogs`
    pub async fn get_logs(&self, filter: &FilterParams) -> Result<Vec<Log>, RpcError> {
        self.logs("eth_getLogs", params![filter]).await
    }

    // ─── Helpers ──────────────────────────────────────────────────────────────

    async fn quantity(&self, method: &str, params: Vec<RpcParam>) -> Result<u64, RpcError> {
        let payload = self.rpc.dispatch(method, params).await?;
        Ok(decode::quantity(payload)?)
    }

    async fn optional<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<RpcParam>,
    ) -> Result<Option<T>, RpcError> {
        let payload = self.rpc.dispatch(method, params).await?;
        Ok(decode::optional(payload)?)
    }

    async fn logs(&self, method: &str, params: Vec<RpcParam>) -> Result<Vec<Log>, RpcError> {
        let payload = self.rpc.dispatch(method, params).await?;
        Ok(decode::list(payload)?)
    }
}
