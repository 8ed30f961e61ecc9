use dnsplit_application::use_cases::HandleDatagramUseCase;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use super::forwarding::FORWARD_TIMEOUT;

/// Largest client datagram accepted; anything beyond is cut off by the kernel.
pub const MAX_DATAGRAM_SIZE: usize = 4096;

/// Slack on top of the forward deadline when draining in-flight requests.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Pause after a failed receive, so a persistent socket error cannot spin.
pub const RECV_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// UDP front end: one task per datagram, at most `max_concurrent` at a time.
///
/// The acceptor waits for a permit before reading the next datagram, so under
/// load excess queries queue in the kernel socket buffer rather than in memory.
pub struct UdpDnsListener {
    socket: Arc<UdpSocket>,
    handler: Arc<HandleDatagramUseCase>,
    permits: Arc<Semaphore>,
    shutdown: CancellationToken,
    tasks: TaskTracker,
    drain_timeout: Duration,
}

impl UdpDnsListener {
    pub fn new(
        socket: UdpSocket,
        handler: Arc<HandleDatagramUseCase>,
        max_concurrent: usize,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            socket: Arc::new(socket),
            handler,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            shutdown,
            tasks: TaskTracker::new(),
            drain_timeout: FORWARD_TIMEOUT + SHUTDOWN_GRACE,
        }
    }

    pub fn with_drain_timeout(mut self, drain_timeout: Duration) -> Self {
        self.drain_timeout = drain_timeout;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serves until the shutdown token is cancelled, then waits (bounded) for
    /// in-flight requests. Replies finishing after cancellation are discarded.
    pub async fn run(self) {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];

        loop {
            let permit = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                permit = Arc::clone(&self.permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let (len, client) = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                received = self.socket.recv_from(&mut buf) => match received {
                    Ok(received) => received,
                    Err(e) => {
                        warn!(error = %e, "Failed to receive datagram");
                        if !pause_after_recv_error(&self.shutdown).await {
                            break;
                        }
                        continue;
                    }
                },
            };

            let datagram: Arc<[u8]> = Arc::from(&buf[..len]);
            let socket = Arc::clone(&self.socket);
            let handler = Arc::clone(&self.handler);
            let shutdown = self.shutdown.clone();

            self.tasks.spawn(async move {
                let _permit = permit;
                let outcome = handler.execute(datagram).await;

                let Some(reply) = outcome.reply() else {
                    return;
                };

                if shutdown.is_cancelled() {
                    debug!(client = %client, "Discarding reply finished after shutdown");
                    return;
                }

                if let Err(e) = socket.send_to(reply, client).await {
                    warn!(client = %client, error = %e, "Failed to send reply");
                }
            });
        }

        self.tasks.close();
        info!(in_flight = self.tasks.len(), "DNS listener stopping");

        if tokio::time::timeout(self.drain_timeout, self.tasks.wait())
            .await
            .is_err()
        {
            warn!(
                abandoned = self.tasks.len(),
                "In-flight requests did not finish before drain deadline"
            );
        }

        info!("DNS listener stopped");
    }
}

/// Sleeps for [`RECV_ERROR_BACKOFF`]. Returns `false` if shutdown was
/// requested in the meantime.
async fn pause_after_recv_error(shutdown: &CancellationToken) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => false,
        _ = tokio::time::sleep(RECV_ERROR_BACKOFF) => true,
    }
}
