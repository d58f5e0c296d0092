//! The `RpcTransport` trait, the injected send capability.

use async_trait::async_trait;

use crate::error::TransportError;

/// A POST-style request/response capability.
///
/// The dispatcher hands over a fully serialized envelope and expects the raw
/// reply body back; envelope parsing and error classification stay in the
/// dispatcher. Timeouts and cancellation are the transport's business.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so one client can be shared across
/// Tokio tasks.
///
/// # Object Safety
/// The trait is object-safe and can be stored as `Arc<dyn RpcTransport>`.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// POST `body` to `url` and return the response body.
    async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: String,
    ) -> Result<String, TransportError>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for std::sync::Arc<T> {
    async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: String,
    ) -> Result<String, TransportError> {
        (**self).post(url, content_type, body).await
    }
}
