//! Domain records decoded from (or encoded into) RPC payloads.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize, Serializer};

use crate::quantity::{self, serde_big, serde_opt_big, serde_opt_u64, serde_u64};

// ─── BlockTag ─────────────────────────────────────────────────────────────────

/// Block identifier for state queries and filter ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockTag {
    /// Explicit block number.
    Number(u64),
    /// Latest mined block.
    #[default]
    Latest,
    /// Genesis block.
    Earliest,
    /// Pending state.
    Pending,
    /// Latest safe head.
    Safe,
    /// Latest finalized block.
    Finalized,
}

impl From<u64> for BlockTag {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl std::fmt::Display for BlockTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", quantity::int_to_hex(*n)),
            Self::Latest => write!(f, "latest"),
            Self::Earliest => write!(f, "earliest"),
            Self::Pending => write!(f, "pending"),
            Self::Safe => write!(f, "safe"),
            Self::Finalized => write!(f, "finalized"),
        }
    }
}

impl std::str::FromStr for BlockTag {
    type Err = crate::error::QuantityError;

    /// Accepts a tag name, a hex quantity, or a decimal number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Self::Latest),
            "earliest" => Ok(Self::Earliest),
            "pending" => Ok(Self::Pending),
            "safe" => Ok(Self::Safe),
            "finalized" => Ok(Self::Finalized),
            _ if s.starts_with("0x") => quantity::hex_to_int(s).map(Self::Number),
            _ => s
                .parse::<u64>()
                .map(Self::Number)
                .map_err(|_| crate::error::QuantityError::Parse(s.to_string())),
        }
    }
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ─── TransactionRequest ───────────────────────────────────────────────────────

/// Argument of `eth_call`, `eth_estimateGas` and `eth_sendTransaction`.
///
/// Unset fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_opt_u64")]
    pub gas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_opt_big")]
    pub gas_price: Option<BigUint>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_opt_big")]
    pub value: Option<BigUint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_opt_u64")]
    pub nonce: Option<u64>,
}

impl TransactionRequest {
    /// A request from `from`, everything else unset.
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            ..Default::default()
        }
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn value(mut self, value: BigUint) -> Self {
        self.value = Some(value);
        self
    }

    pub fn gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn gas_price(mut self, gas_price: BigUint) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }
}

// ─── Transaction ──────────────────────────────────────────────────────────────

/// A transaction as returned by `eth_getTransactionBy*` and full blocks.
///
/// Block coordinates are `None` while the transaction is pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    #[serde(with = "serde_u64")]
    pub nonce: u64,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default, with = "serde_opt_u64")]
    pub block_number: Option<u64>,
    #[serde(default, with = "serde_opt_u64")]
    pub transaction_index: Option<u64>,
    pub from: String,
    /// `None` for contract creation.
    #[serde(default)]
    pub to: Option<String>,
    #[serde(with = "serde_big")]
    pub value: BigUint,
    #[serde(with = "serde_u64")]
    pub gas: u64,
    #[serde(default, with = "serde_big")]
    pub gas_price: BigUint,
    #[serde(default)]
    pub input: String,
}

// ─── Log / TransactionReceipt ─────────────────────────────────────────────────

/// An event log. The block and transaction fields are lookup keys only and
/// are `None` for pending logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    #[serde(default)]
    pub removed: bool,
    #[serde(default, with = "serde_opt_u64")]
    pub log_index: Option<u64>,
    #[serde(default, with = "serde_opt_u64")]
    pub transaction_index: Option<u64>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default, with = "serde_opt_u64")]
    pub block_number: Option<u64>,
    pub address: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Result of `eth_getTransactionReceipt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(with = "serde_u64")]
    pub transaction_index: u64,
    pub block_hash: String,
    #[serde(with = "serde_u64")]
    pub block_number: u64,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(with = "serde_u64")]
    pub cumulative_gas_used: u64,
    #[serde(with = "serde_u64")]
    pub gas_used: u64,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub logs: Vec<Log>,
    #[serde(default)]
    pub logs_bloom: String,
    /// Post-state root (pre-Byzantium receipts).
    #[serde(default)]
    pub root: Option<String>,
    /// `1` success, `0` failure (Byzantium and later).
    #[serde(default, with = "serde_opt_u64")]
    pub status: Option<u64>,
}

impl TransactionReceipt {
    /// `Some(true)` if the receipt carries a success status.
    pub fn succeeded(&self) -> Option<bool> {
        self.status.map(|s| s == 1)
    }
}

// ─── Block ────────────────────────────────────────────────────────────────────

/// Everything in a block except its transaction list.
///
/// `number`, `hash`, `nonce` and `logs_bloom` are null for pending blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    #[serde(default, with = "serde_opt_u64")]
    pub number: Option<u64>,
    #[serde(default)]
    pub hash: Option<String>,
    pub parent_hash: String,
    #[serde(default)]
    pub nonce: Option<String>,
    #[serde(default)]
    pub sha3_uncles: String,
    #[serde(default)]
    pub logs_bloom: Option<String>,
    #[serde(default)]
    pub transactions_root: String,
    #[serde(default)]
    pub state_root: String,
    #[serde(default)]
    pub receipts_root: String,
    pub miner: String,
    #[serde(default, with = "serde_big")]
    pub difficulty: BigUint,
    #[serde(default, with = "serde_opt_big")]
    pub total_difficulty: Option<BigUint>,
    #[serde(default)]
    pub extra_data: String,
    #[serde(default, with = "serde_u64")]
    pub size: u64,
    #[serde(with = "serde_u64")]
    pub gas_limit: u64,
    #[serde(with = "serde_u64")]
    pub gas_used: u64,
    #[serde(with = "serde_u64")]
    pub timestamp: u64,
    #[serde(default, with = "serde_opt_big")]
    pub base_fee_per_gas: Option<BigUint>,
    #[serde(default)]
    pub uncles: Vec<String>,
}

/// Which of the two `eth_getBlockBy*` reply shapes to decode.
///
/// Chosen from the caller's `with_transactions` flag before the reply arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    /// `transactions` is a list of hash strings.
    Hashes,
    /// `transactions` is a list of transaction objects.
    Full,
}

impl BlockShape {
    pub fn from_flag(with_transactions: bool) -> Self {
        if with_transactions {
            Self::Full
        } else {
            Self::Hashes
        }
    }

    pub fn with_transactions(self) -> bool {
        self == Self::Full
    }
}

/// A block's transaction list: all hashes or all full records, never mixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlockTransactions {
    Hashes(Vec<String>),
    Full(Vec<Transaction>),
}

impl BlockTransactions {
    /// `true` if the list holds full transaction records.
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Hashes(h) => h.len(),
            Self::Full(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Transaction hashes in block order, whichever shape was fetched.
    pub fn hashes(&self) -> Vec<&str> {
        match self {
            Self::Hashes(h) => h.iter().map(String::as_str).collect(),
            Self::Full(t) => t.iter().map(|tx| tx.hash.as_str()).collect(),
        }
    }

    /// The full records, if the block was fetched with transactions.
    pub fn as_full(&self) -> Option<&[Transaction]> {
        match self {
            Self::Full(t) => Some(t),
            Self::Hashes(_) => None,
        }
    }
}

/// A block returned by `eth_getBlockByHash` / `eth_getBlockByNumber`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    #[serde(flatten)]
    pub header: BlockHeader,
    pub transactions: BlockTransactions,
}

// ─── Syncing ──────────────────────────────────────────────────────────────────

/// Progress figures reported while the node is syncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncProgress {
    #[serde(with = "serde_u64")]
    pub starting_block: u64,
    #[serde(with = "serde_u64")]
    pub current_block: u64,
    #[serde(with = "serde_u64")]
    pub highest_block: u64,
}

/// Result of `eth_syncing`: the literal `false`, or a progress object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    NotSyncing,
    Syncing(SyncProgress),
}

impl SyncStatus {
    pub fn is_syncing(&self) -> bool {
        matches!(self, Self::Syncing(_))
    }

    pub fn progress(&self) -> Option<&SyncProgress> {
        match self {
            Self::Syncing(p) => Some(p),
            Self::NotSyncing => None,
        }
    }
}

// ─── FilterParams ─────────────────────────────────────────────────────────────

/// Log query for `eth_newFilter` and `eth_getLogs`.
///
/// `topics` is positional; an empty list at a position matches any topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<Vec<String>>,
}

impl FilterParams {
    /// Create a filter for a single contract address.
    pub fn address(addr: impl Into<String>) -> Self {
        Self {
            address: vec![addr.into()],
            ..Default::default()
        }
    }

    /// Add another contract address.
    pub fn or_address(mut self, addr: impl Into<String>) -> Self {
        self.address.push(addr.into());
        self
    }

    /// Append a topic position matching any of `topics`.
    pub fn topic(mut self, topics: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.topics.push(topics.into_iter().map(Into::into).collect());
        self
    }

    pub fn from_block(mut self, block: impl Into<BlockTag>) -> Self {
        self.from_block = Some(block.into());
        self
    }

    pub fn to_block(mut self, block: impl Into<BlockTag>) -> Self {
        self.to_block = Some(block.into());
        self
    }

    /// Restrict to a single block by hash (excludes a block range).
    pub fn block_hash(mut self, hash: impl Into<String>) -> Self {
        self.block_hash = Some(hash.into());
        self
    }
}
