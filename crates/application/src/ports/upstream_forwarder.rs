use async_trait::async_trait;
use dnsplit_domain::{DomainError, Nameserver};

/// Reply bytes exactly as the upstream sent them, or why there are none.
pub type ForwardResult = Result<Vec<u8>, DomainError>;

#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// One query/reply round trip with `nameserver`.
    ///
    /// Errors are `DomainError::ForwardTimeout` or
    /// `DomainError::ForwardTransport`. No retries.
    async fn exchange(&self, query: &[u8], nameserver: &Nameserver) -> ForwardResult;
}
