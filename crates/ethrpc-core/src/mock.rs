//! In-memory transport for tests and offline use.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::TransportError;
use crate::request::JsonRpcRequest;
use crate::transport::RpcTransport;

#[derive(Debug, Clone)]
enum MockReply {
    Body(String),
    Fail(String),
}

/// A fake transport that answers from canned reply bodies keyed by method.
///
/// Every request body it receives is recorded. Methods without a canned
/// reply get a `-32601 Method not found` error envelope.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, MockReply>>,
    requests: Mutex<Vec<String>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    /// Create a mock with no canned replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` with this exact response body.
    pub fn reply(&self, method: &str, body: impl Into<String>) {
        lock(&self.replies).insert(method.to_string(), MockReply::Body(body.into()));
    }

    /// Answer `method` with a success envelope carrying `result`.
    pub fn reply_result(&self, method: &str, result: Value) {
        let body = json!({ "id": 1, "jsonrpc": "2.0", "result": result });
        self.reply(method, body.to_string());
    }

    /// Answer `method` with an error envelope.
    pub fn reply_error(&self, method: &str, code: i64, message: &str) {
        let body = json!({
            "id": 1,
            "jsonrpc": "2.0",
            "error": { "code": code, "message": message },
        });
        self.reply(method, body.to_string());
    }

    /// Fail `method` at the transport level.
    pub fn fail(&self, method: &str, cause: impl Into<String>) {
        lock(&self.replies).insert(method.to_string(), MockReply::Fail(cause.into()));
    }

    /// Drop all canned replies.
    pub fn clear(&self) {
        lock(&self.replies).clear();
    }

    /// Raw request bodies received so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    /// The most recent request, parsed.
    pub fn last_request(&self) -> Option<JsonRpcRequest> {
        let requests = lock(&self.requests);
        requests
            .last()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn post(
        &self,
        _url: &str,
        _content_type: &str,
        body: String,
    ) -> Result<String, TransportError> {
        lock(&self.requests).push(body.clone());

        let req: JsonRpcRequest = serde_json::from_str(&body)
            .map_err(|e| TransportError::Other(format!("mock received invalid request: {e}")))?;

        let reply = lock(&self.replies).get(&req.method).cloned();
        match reply {
            Some(MockReply::Body(body)) => Ok(body),
            Some(MockReply::Fail(cause)) => Err(TransportError::Http(cause)),
            None => Ok(json!({
                "id": req.id,
                "jsonrpc": "2.0",
                "error": { "code": -32601, "message": "Method not found" },
            })
            .to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str) -> String {
        serde_json::to_string(&JsonRpcRequest::new(1, method, vec![])).unwrap()
    }

    #[tokio::test]
    async fn canned_result() {
        let mock = MockTransport::new();
        mock.reply_result("eth_chainId", json!("0x1"));

        let body = mock
            .post("http://mock", "application/json", request("eth_chainId"))
            .await
            .unwrap();
        assert_eq!(body, r#"{"id":1,"jsonrpc":"2.0","result":"0x1"}"#);
        assert_eq!(mock.requests().len(), 1);
        assert_eq!(mock.last_request().unwrap().method, "eth_chainId");
    }

    #[tokio::test]
    async fn unknown_method_is_error_envelope() {
        let mock = MockTransport::new();
        let body = mock
            .post("http://mock", "application/json", request("eth_nope"))
            .await
            .unwrap();
        assert!(body.contains("-32601"));
    }

    #[tokio::test]
    async fn injected_failure() {
        let mock = MockTransport::new();
        mock.fail("net_version", "connection refused");
        let err = mock
            .post("http://mock", "application/json", request("net_version"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Http(ref m) if m == "connection refused"));
    }
}
