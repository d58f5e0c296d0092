//! Error types for every layer of a call.

use thiserror::Error;

use crate::request::{JsonRpcError, RpcId};

/// Malformed or out-of-range hex quantity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// Missing `0x` prefix or a non-hex digit.
    #[error("invalid quantity {0:?}")]
    Parse(String),

    /// Valid hex, but larger than the requested native integer.
    #[error("quantity {0} overflows u64")]
    Overflow(String),
}

/// A result payload that does not have the shape the method expects.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not the JSON shape of the target type.
    #[error("unexpected payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A quantity field or scalar failed the hex codec.
    #[error(transparent)]
    Quantity(#[from] QuantityError),

    /// The payload's transaction list does not match the requested block shape.
    #[error("block does not match requested shape (with_transactions = {with_transactions}): {source}")]
    BlockShape {
        with_transactions: bool,
        #[source]
        source: serde_json::Error,
    },

    /// `eth_syncing` returned something other than `false` or an object.
    #[error("unexpected syncing payload: {0}")]
    SyncStatus(String),
}

/// Failure of the injected transport capability.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, body read failure, etc.).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}

/// Everything a single RPC call can fail with.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The request could not be sent or the reply could not be read.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A caller-supplied parameter could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The reply body is not a JSON-RPC response envelope.
    #[error("malformed response envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// The reply answers a different request.
    #[error("response id {got} does not match request id {expected}")]
    IdMismatch { expected: RpcId, got: RpcId },

    /// The node returned a JSON-RPC error object.
    #[error("{0}")]
    Protocol(JsonRpcError),

    /// The result payload does not decode into the expected type.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl RpcError {
    /// Returns `true` if the transport failed before a reply was read.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the node answered with an error object.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    /// Returns `true` if the reply or its payload could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::Envelope(_) | Self::IdMismatch { .. } | Self::Decode(_)
        )
    }

    /// The server-supplied error code, for protocol errors.
    pub fn protocol_code(&self) -> Option<i64> {
        match self {
            Self::Protocol(e) => Some(e.code),
            _ => None,
        }
    }
}

impl From<JsonRpcError> for RpcError {
    fn from(e: JsonRpcError) -> Self {
        Self::Protocol(e)
    }
}

impl From<QuantityError> for RpcError {
    fn from(e: QuantityError) -> Self {
        Self::Decode(DecodeError::Quantity(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_keeps_code_and_message() {
        let err: RpcError = JsonRpcError {
            code: -32601,
            message: "Method not found".into(),
            data: None,
        }
        .into();
        assert!(err.is_protocol());
        assert!(!err.is_transport());
        assert_eq!(err.protocol_code(), Some(-32601));
        assert_eq!(err.to_string(), "Error -32601 (Method not found)");
    }

    #[test]
    fn quantity_error_is_decode() {
        let err: RpcError = QuantityError::Parse("123".into()).into();
        assert!(err.is_decode());
        assert_eq!(err.protocol_code(), None);
    }

    #[test]
    fn transport_error_display() {
        let err: RpcError = TransportError::Timeout { ms: 1500 }.into();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "Request timed out after 1500ms");
    }
}
