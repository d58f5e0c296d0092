//! `EthRpc`: a configured client and its builder.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use ethrpc_core::{RpcClient, RpcError, RpcLogger, RpcParam, RpcTransport};
use ethrpc_http::{HttpTransport, HttpTransportConfig};

use crate::eth::Eth;
use crate::net::Net;
use crate::personal::Personal;
use crate::web3::Web3;

/// Serialize one positional parameter.
pub(crate) fn param<T: Serialize + ?Sized>(value: &T) -> Result<RpcParam, RpcError> {
    serde_json::to_value(value).map_err(RpcError::Encode)
}

/// An Ethereum JSON-RPC client bound to one endpoint.
///
/// Immutable after construction and cheap to clone; clones share the
/// transport and logger.
#[derive(Debug, Clone)]
pub struct EthRpc {
    rpc: RpcClient,
}

impl EthRpc {
    /// A client for `endpoint` over HTTP with default settings.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RpcError> {
        Self::builder(endpoint).build()
    }

    pub fn builder(endpoint: impl Into<String>) -> EthRpcBuilder {
        EthRpcBuilder::new(endpoint)
    }

    /// Wrap an already configured dispatcher.
    pub fn from_rpc(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    pub fn endpoint(&self) -> &str {
        self.rpc.endpoint()
    }

    pub fn web3(&self) -> Web3<'_> {
        Web3::new(&self.rpc)
    }

    pub fn net(&self) -> Net<'_> {
        Net::new(&self.rpc)
    }

    pub fn eth(&self) -> Eth<'_> {
        Eth::new(&self.rpc)
    }

    pub fn personal(&self) -> Personal<'_> {
        Personal::new(&self.rpc)
    }

    /// Call any method and return the undecoded result payload.
    pub async fn dispatch(&self, method: &str, params: Vec<RpcParam>) -> Result<Value, RpcError> {
        self.rpc.dispatch(method, params).await
    }

    /// Call any method and decode the result into `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<RpcParam>,
    ) -> Result<T, RpcError> {
        self.rpc.call(method, params).await
    }
}

/// Builder for [`EthRpc`].
///
/// Without a transport, `build` creates an [`HttpTransport`] from the HTTP
/// config. Without a logger, debug records go to `tracing`.
pub struct EthRpcBuilder {
    endpoint: String,
    transport: Option<Arc<dyn RpcTransport>>,
    logger: Option<Arc<dyn RpcLogger>>,
    debug: bool,
    http_config: HttpTransportConfig,
}

impl EthRpcBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport: None,
            logger: None,
            debug: false,
            http_config: HttpTransportConfig::default(),
        }
    }

    /// Use `transport` instead of the default HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn RpcTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn logger(mut self, logger: Arc<dyn RpcLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Log every exchange (request body and raw reply) to the logger.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Settings for the default HTTP transport. Ignored when a transport is
    /// supplied.
    pub fn http_config(mut self, config: HttpTransportConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn build(self) -> Result<EthRpc, RpcError> {
        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(self.http_config)?),
        };
        let mut rpc = RpcClient::new(self.endpoint, transport).with_debug(self.debug);
        if let Some(logger) = self.logger {
            rpc = rpc.with_logger(logger);
        }
        tracing::debug!(endpoint = rpc.endpoint(), debug = self.debug, "ethrpc client ready");
        Ok(EthRpc { rpc })
    }
}
