//! HTTP POST transport backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;

use ethrpc_core::error::TransportError;
use ethrpc_core::transport::RpcTransport;

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Whole-exchange timeout, connect through last body byte.
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("ethrpc/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Posts request bodies over HTTP(S).
///
/// The reply body is returned whatever the HTTP status: nodes commonly put
/// a JSON-RPC error envelope in a 4xx/5xx reply, and a non-JSON body is
/// reported by the dispatcher as an envelope error.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    request_timeout: Option<Duration>,
}

impl HttpTransport {
    /// Build a transport with its own `reqwest` client.
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            request_timeout: Some(config.request_timeout),
        })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self, TransportError> {
        Self::new(HttpTransportConfig::default())
    }

    /// Wrap a caller-configured `reqwest` client (proxies, TLS roots, pools).
    pub fn from_client(http: reqwest::Client) -> Self {
        Self {
            http,
            request_timeout: None,
        }
    }

    fn classify(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            let ms = self
                .request_timeout
                .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX))
                .unwrap_or(0);
            TransportError::Timeout { ms }
        } else {
            TransportError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: String,
    ) -> Result<String, TransportError> {
        let resp = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), url, "non-success HTTP status");
        }

        resp.text().await.map_err(|e| self.classify(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = HttpTransportConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("ethrpc/"));
    }

    #[test]
    fn builds_with_defaults() {
        let transport = HttpTransport::with_defaults().unwrap();
        assert_eq!(transport.request_timeout, Some(Duration::from_secs(30)));
    }
}
