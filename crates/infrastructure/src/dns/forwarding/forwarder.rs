use async_trait::async_trait;
use dnsplit_application::ports::{ForwardResult, UpstreamForwarder};
use dnsplit_domain::{DomainError, Nameserver};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, info};

use super::ReplySummary;

/// Upper bound on one whole exchange: lookup, send and receive.
pub const FORWARD_TIMEOUT: Duration = Duration::from_secs(3);

/// Receive buffer for upstream replies. Longer datagrams are truncated.
pub const MAX_REPLY_SIZE: usize = 1024;

/// Forwards raw queries over UDP, one fresh socket per exchange.
pub struct UdpForwarder {
    timeout: Duration,
}

impl UdpForwarder {
    pub fn new() -> Self {
        Self {
            timeout: FORWARD_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn round_trip(&self, query: &[u8], nameserver: &Nameserver) -> ForwardResult {
        let server_addr = resolve(nameserver).await?;
        let transport = |e: std::io::Error| DomainError::ForwardTransport {
            server: nameserver.to_string(),
            reason: e.to_string(),
        };

        let bind_addr: SocketAddr = if server_addr.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        // Dropped on every return path, timeouts included.
        let socket = UdpSocket::bind(bind_addr).await.map_err(transport)?;
        // Connected: datagrams from any other source are discarded by the kernel.
        socket.connect(server_addr).await.map_err(transport)?;

        let bytes_sent = socket.send(query).await.map_err(transport)?;
        debug!(server = %server_addr, bytes_sent, "Query sent upstream");

        let mut reply = vec![0u8; MAX_REPLY_SIZE];
        let bytes_received = socket.recv(&mut reply).await.map_err(transport)?;
        reply.truncate(bytes_received);

        Ok(reply)
    }
}

impl Default for UdpForwarder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamForwarder for UdpForwarder {
    async fn exchange(&self, query: &[u8], nameserver: &Nameserver) -> ForwardResult {
        let reply = tokio::time::timeout(self.timeout, self.round_trip(query, nameserver))
            .await
            .map_err(|_| DomainError::ForwardTimeout {
                server: nameserver.to_string(),
            })??;

        match ReplySummary::from_bytes(&reply) {
            Some(summary) => info!(
                server = %nameserver,
                bytes = reply.len(),
                reply = %summary,
                "Forwarded query"
            ),
            None => info!(
                server = %nameserver,
                bytes = reply.len(),
                "Forwarded query, reply not decodable"
            ),
        }

        Ok(reply)
    }
}

async fn resolve(nameserver: &Nameserver) -> Result<SocketAddr, DomainError> {
    let hostname = match nameserver {
        Nameserver::Resolved(addr) => return Ok(*addr),
        Nameserver::Unresolved { hostname, .. } => hostname,
    };

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((&**hostname, nameserver.port()))
        .await
        .map_err(|e| DomainError::ForwardTransport {
            server: nameserver.to_string(),
            reason: format!("lookup failed: {}", e),
        })?
        .collect();

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| DomainError::ForwardTransport {
            server: nameserver.to_string(),
            reason: "hostname has no addresses".to_string(),
        })
}
