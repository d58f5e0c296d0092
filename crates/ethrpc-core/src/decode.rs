//! Result payload decoding.
//!
//! The dispatcher hands back an untyped `serde_json::Value`; these functions
//! turn it into the shape a method promises. Every failure is a
//! [`DecodeError`].

use num_bigint::BigUint;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;
use crate::quantity::{hex_to_big_int, hex_to_int};
use crate::types::{Block, BlockHeader, BlockShape, BlockTransactions, SyncProgress, SyncStatus};

/// Decode into any deserializable type.
pub fn value<T: DeserializeOwned>(payload: Value) -> Result<T, DecodeError> {
    Ok(serde_json::from_value(payload)?)
}

/// Decode a `u64` quantity. The payload must be a hex string.
pub fn quantity(payload: Value) -> Result<u64, DecodeError> {
    let s: String = value(payload)?;
    Ok(hex_to_int(&s)?)
}

/// Decode an arbitrary-precision quantity. The payload must be a hex string.
pub fn big_quantity(payload: Value) -> Result<BigUint, DecodeError> {
    let s: String = value(payload)?;
    Ok(hex_to_big_int(&s)?)
}

/// Decode a list. A null payload is an empty list.
pub fn list<T: DeserializeOwned>(payload: Value) -> Result<Vec<T>, DecodeError> {
    if payload.is_null() {
        return Ok(Vec::new());
    }
    value(payload)
}

/// Decode a record the node may answer with null for "not found".
pub fn optional<T: DeserializeOwned>(payload: Value) -> Result<Option<T>, DecodeError> {
    value(payload)
}

/// Decode a block in the shape fixed by the caller's `with_transactions` flag.
///
/// A null payload (unknown block) is `Ok(None)`. Header fields decode on
/// their own, so a bad header field is a plain [`DecodeError::Json`]; only a
/// transaction list that does not match `shape` is a
/// [`DecodeError::BlockShape`]. A missing list is empty.
pub fn block(mut payload: Value, shape: BlockShape) -> Result<Option<Block>, DecodeError> {
    if payload.is_null() {
        return Ok(None);
    }
    let transactions = payload
        .as_object_mut()
        .and_then(|fields| fields.remove("transactions"))
        .unwrap_or(Value::Null);
    let header: BlockHeader = value(payload)?;
    let transactions = match shape {
        BlockShape::Hashes => BlockTransactions::Hashes(shaped_list(transactions, shape)?),
        BlockShape::Full => BlockTransactions::Full(shaped_list(transactions, shape)?),
    };
    Ok(Some(Block {
        header,
        transactions,
    }))
}

fn shaped_list<T: DeserializeOwned>(
    payload: Value,
    shape: BlockShape,
) -> Result<Vec<T>, DecodeError> {
    if payload.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(payload).map_err(|source| DecodeError::BlockShape {
        with_transactions: shape.with_transactions(),
        source,
    })
}

/// Decode `eth_syncing`: literal `false`, or a progress object.
pub fn sync_status(payload: Value) -> Result<SyncStatus, DecodeError> {
    match payload {
        Value::Bool(false) => Ok(SyncStatus::NotSyncing),
        Value::Object(_) => {
            let progress: SyncProgress = value(payload)?;
            Ok(SyncStatus::Syncing(progress))
        }
        other => Err(DecodeError::SyncStatus(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Transaction;
    use serde_json::json;

    #[test]
    fn quantity_requires_string() {
        assert_eq!(quantity(json!("0x10")).unwrap(), 16);
        assert!(matches!(quantity(json!(16)), Err(DecodeError::Json(_))));
        assert!(matches!(quantity(json!("16")), Err(DecodeError::Quantity(_))));
        assert!(matches!(quantity(Value::Null), Err(DecodeError::Json(_))));
    }

    #[test]
    fn big_quantity_decodes_balance() {
        assert_eq!(
            big_quantity(json!("0x1bc16d674ec80000")).unwrap(),
            BigUint::from(2_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn list_never_absent() {
        let empty: Vec<String> = list(json!([])).unwrap();
        assert!(empty.is_empty());
        let null: Vec<String> = list(Value::Null).unwrap();
        assert!(null.is_empty());
        let some: Vec<String> = list(json!(["0xa", "0xb"])).unwrap();
        assert_eq!(some, vec!["0xa", "0xb"]);
        assert!(list::<String>(json!("0xa")).is_err());
    }

    #[test]
    fn optional_null_is_none() {
        let none: Option<Transaction> = optional(Value::Null).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn syncing_false() {
        assert_eq!(sync_status(json!(false)).unwrap(), SyncStatus::NotSyncing);
    }

    #[test]
    fn syncing_progress() {
        let status = sync_status(json!({
            "startingBlock": "0x0",
            "currentBlock": "0x10",
            "highestBlock": "0x20",
        }))
        .unwrap();
        assert!(status.is_syncing());
        assert_eq!(
            status.progress(),
            Some(&SyncProgress {
                starting_block: 0,
                current_block: 16,
                highest_block: 32,
            })
        );
    }

    #[test]
    fn syncing_rejects_other_shapes() {
        assert!(matches!(sync_status(json!(true)), Err(DecodeError::SyncStatus(_))));
        assert!(matches!(sync_status(Value::Null), Err(DecodeError::SyncStatus(_))));
        assert!(matches!(
            sync_status(json!({ "currentBlock": "0x10" })),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn null_block_is_none() {
        assert!(block(Value::Null, BlockShape::Full).unwrap().is_none());
    }

    fn header_fields() -> Value {
        json!({
            "number": "0x1b4",
            "hash": "0xb1",
            "parentHash": "0xb0",
            "miner": "0x4e65fda2159562a496f9f3522f89122a3088497a",
            "gasLimit": "0x9f759",
            "gasUsed": "0x0",
            "timestamp": "0x54e34e8e",
        })
    }

    fn with_transactions(transactions: Value) -> Value {
        let mut payload = header_fields();
        payload["transactions"] = transactions;
        payload
    }

    fn full_transaction() -> Value {
        json!({
            "hash": "0xt1",
            "nonce": "0x0",
            "blockHash": "0xb1",
            "blockNumber": "0x1b4",
            "transactionIndex": "0x0",
            "from": "0xaaa",
            "to": "0xbbb",
            "value": "0xde0b6b3a7640000",
            "gas": "0x5208",
            "gasPrice": "0x3b9aca00",
            "input": "0x",
        })
    }

    #[test]
    fn full_block_decodes_transaction_records() {
        let block = block(with_transactions(json!([full_transaction()])), BlockShape::Full)
            .unwrap()
            .unwrap();
        assert!(block.transactions.is_full());
        let txs = block.transactions.as_full().unwrap();
        assert_eq!(txs[0].hash, "0xt1");
        assert_eq!(txs[0].gas, 21_000);
        assert_eq!(block.header.number, Some(436));
    }

    #[test]
    fn hash_block_decodes_hashes() {
        let block = block(with_transactions(json!(["0xt1", "0xt2"])), BlockShape::Hashes)
            .unwrap()
            .unwrap();
        assert_eq!(block.transactions.hashes(), vec!["0xt1", "0xt2"]);
    }

    #[test]
    fn missing_transactions_is_empty_list() {
        let block = block(header_fields(), BlockShape::Full).unwrap().unwrap();
        assert_eq!(block.transactions, BlockTransactions::Full(vec![]));
    }

    #[test]
    fn shape_mismatch_is_block_shape_error() {
        let err = block(with_transactions(json!([full_transaction()])), BlockShape::Hashes)
            .unwrap_err();
        assert!(matches!(err, DecodeError::BlockShape { with_transactions: false, .. }));

        let err = block(with_transactions(json!(["0xt1"])), BlockShape::Full).unwrap_err();
        assert!(matches!(err, DecodeError::BlockShape { with_transactions: true, .. }));
    }

    #[test]
    fn bad_header_field_is_not_a_shape_error() {
        let mut payload = with_transactions(json!(["0xt1"]));
        payload["gasLimit"] = json!("0xzz");
        let err = block(payload, BlockShape::Hashes).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
        assert!(err.to_string().contains("0xzz"));
    }
}
