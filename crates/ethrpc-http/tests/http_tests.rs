//! HttpTransport against a one-shot local HTTP server.

use std::sync::Arc;
use std::time::Duration;

use ethrpc_core::{RpcClient, RpcError, RpcTransport, TransportError, JSON_CONTENT_TYPE};
use ethrpc_http::{HttpTransport, HttpTransportConfig};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Serve exactly one request with `status` and `body`; the handle yields the
/// raw request text.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });
    (format!("http://{addr}"), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .map(|v| v.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            if buf.len() >= end + 4 + len {
                break;
            }
        }
    }
    String::from_utf8(buf).unwrap()
}

// ─── Transport ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn posts_body_and_returns_reply() {
    let reply = r#"{"id":1,"jsonrpc":"2.0","result":"0x10"}"#;
    let (url, server) = serve_once("200 OK", reply).await;
    let body = r#"{"id":1,"jsonrpc":"2.0","method":"eth_blockNumber","params":[]}"#;

    let transport = HttpTransport::with_defaults().unwrap();
    let got = transport.post(&url, JSON_CONTENT_TYPE, body.to_string()).await.unwrap();
    assert_eq!(got, reply);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST / HTTP/1.1\r\n"));
    assert!(request.to_lowercase().contains("content-type: application/json"));
    assert!(request.to_lowercase().contains("user-agent: ethrpc/"));
    assert!(request.ends_with(body));
}

#[tokio::test]
async fn non_success_status_still_returns_body() {
    let reply = r#"{"id":1,"jsonrpc":"2.0","error":{"code":-32005,"message":"rate limited"}}"#;
    let (url, server) = serve_once("429 Too Many Requests", reply).await;

    let transport = HttpTransport::with_defaults().unwrap();
    let got = transport.post(&url, JSON_CONTENT_TYPE, "{}".into()).await.unwrap();
    assert_eq!(got, reply);
    server.await.unwrap();
}

#[tokio::test]
async fn refused_connection_is_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let transport = HttpTransport::with_defaults().unwrap();
    let err = transport.post(&url, JSON_CONTENT_TYPE, "{}".into()).await.unwrap_err();
    assert!(matches!(err, TransportError::Http(_)));
}

#[tokio::test]
async fn silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(socket);
    });

    let transport = HttpTransport::new(HttpTransportConfig {
        request_timeout: Duration::from_millis(200),
        ..Default::default()
    })
    .unwrap();
    let err = transport.post(&url, JSON_CONTENT_TYPE, "{}".into()).await.unwrap_err();
    assert!(matches!(err, TransportError::Timeout { ms: 200 }));
    server.abort();
}

// ─── Through the dispatcher ───────────────────────────────────────────────────

#[tokio::test]
async fn dispatcher_over_http() {
    let (url, server) = serve_once("200 OK", r#"{"id":1,"jsonrpc":"2.0","result":"0x1bc16d674ec80000"}"#).await;
    let transport = Arc::new(HttpTransport::with_defaults().unwrap());
    let client = RpcClient::new(url, transport);

    let payload = client
        .dispatch("eth_getBalance", vec![json!("0xabc"), json!("latest")])
        .await
        .unwrap();
    assert_eq!(payload, json!("0x1bc16d674ec80000"));

    let request = server.await.unwrap();
    assert!(request.ends_with(
        r#"{"id":1,"jsonrpc":"2.0","method":"eth_getBalance","params":["0xabc","latest"]}"#
    ));
}

#[tokio::test]
async fn html_gateway_page_is_envelope_error() {
    let (url, server) = serve_once("502 Bad Gateway", "<html>bad gateway</html>").await;
    let client = RpcClient::new(url, Arc::new(HttpTransport::with_defaults().unwrap()));

    let err = client.dispatch("eth_blockNumber", vec![]).await.unwrap_err();
    assert!(matches!(err, RpcError::Envelope(_)));
    server.await.unwrap();
}
