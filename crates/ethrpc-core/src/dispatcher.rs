//! `RpcClient`: sends one envelope, reads one reply, classifies the outcome.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::decode;
use crate::error::{RpcError, TransportError};
use crate::logger::{RpcLogger, TracingLogger};
use crate::request::{JsonRpcRequest, JsonRpcResponse, RpcParam};
use crate::transport::RpcTransport;

/// Every request carries this id; a client has one call in flight per
/// `dispatch`, so the id only has to match that call's reply.
pub const REQUEST_ID: u64 = 1;

/// Content type of every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The call dispatcher.
///
/// Holds immutable configuration only; clones share the transport and
/// logger, and one instance can serve concurrent callers.
#[derive(Clone)]
pub struct RpcClient {
    endpoint: Arc<str>,
    transport: Arc<dyn RpcTransport>,
    logger: Arc<dyn RpcLogger>,
    debug: bool,
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("endpoint", &self.endpoint)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl RpcClient {
    /// A client posting to `endpoint` through `transport`, logging debug
    /// records to `tracing`, with debug records off.
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            endpoint: Arc::from(endpoint.into()),
            transport,
            logger: Arc::new(TracingLogger),
            debug: false,
        }
    }

    /// Replace the logger that receives debug records.
    pub fn with_logger(mut self, logger: Arc<dyn RpcLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Turn request/response debug records on or off.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Send `method(params)` and return the undecoded result payload.
    ///
    /// A missing or null `result` comes back as `Value::Null`. An error
    /// object in the reply is returned as [`RpcError::Protocol`] even when a
    /// result is also present.
    pub async fn dispatch(&self, method: &str, params: Vec<RpcParam>) -> Result<Value, RpcError> {
        let req = JsonRpcRequest::new(REQUEST_ID, method, params);
        let body = serde_json::to_string(&req).map_err(RpcError::Encode)?;

        tracing::trace!(method, endpoint = %self.endpoint, "dispatching");

        let sent = self.debug.then(|| body.clone());
        let reply = self
            .transport
            .post(&self.endpoint, JSON_CONTENT_TYPE, body)
            .await;

        if let Some(sent) = sent {
            self.logger.log_line(&exchange_record(method, &sent, &reply));
        }

        let data = reply.map_err(|e| {
            tracing::debug!(method, error = %e, "transport failed");
            RpcError::Transport(e)
        })?;

        let resp: JsonRpcResponse = serde_json::from_str(&data).map_err(RpcError::Envelope)?;

        if resp.error.is_none() && !resp.correlates_with(&req) {
            return Err(RpcError::IdMismatch {
                expected: req.id,
                got: resp.id,
            });
        }

        resp.into_result().map_err(|e| {
            tracing::debug!(method, code = e.code, message = %e.message, "node returned error");
            RpcError::Protocol(e)
        })
    }

    /// Dispatch and decode the payload into `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<RpcParam>,
    ) -> Result<T, RpcError> {
        let payload = self.dispatch(method, params).await?;
        Ok(decode::value(payload)?)
    }
}

/// One debug record: method, exact request body, raw reply (or the
/// transport failure in its place).
fn exchange_record(method: &str, request: &str, reply: &Result<String, TransportError>) -> String {
    match reply {
        Ok(data) => format!("{method}\nRequest: {request}\nResponse: {data}\n"),
        Err(e) => format!("{method}\nRequest: {request}\nResponse: <{e}>\n"),
    }
}
