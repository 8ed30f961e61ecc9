#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock upstream treats each query it receives.
#[derive(Debug, Clone, Copy)]
pub enum UpstreamMode {
    /// Reply immediately with a canned A answer.
    Answer,
    /// Reply with the canned answer after a delay.
    Delayed(Duration),
    /// Read the query and never reply.
    Silent,
    /// Reply with a datagram of this many bytes.
    Oversized(usize),
}

pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(mode: UpstreamMode) -> Result<Self, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await?);
        let addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let counter = Arc::clone(&received);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        let query = buf[..len].to_vec();
                        let socket = Arc::clone(&socket);

                        tokio::spawn(async move {
                            let response = match mode {
                                UpstreamMode::Silent => return,
                                UpstreamMode::Answer => Self::build_mock_response(&query),
                                UpstreamMode::Delayed(delay) => {
                                    tokio::time::sleep(delay).await;
                                    Self::build_mock_response(&query)
                                }
                                UpstreamMode::Oversized(size) => {
                                    let mut response = Self::build_mock_response(&query);
                                    response.resize(size, 0xaa);
                                    response
                                }
                            };
                            let _ = socket.send_to(&response, peer).await;
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    /// Echoes the header and question of `query` with QR set and one A
    /// answer (10.53.0.1) appended.
    pub fn build_mock_response(query: &[u8]) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let mut response = Vec::with_capacity(512);

        response.extend_from_slice(&query[0..2]);
        response.push(0x81); // QR, RD
        response.push(0x80); // RA, NOERROR
        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&[0x00, 0x01]); // ANCOUNT
        response.extend_from_slice(&[0x00, 0x00]);
        response.extend_from_slice(&[0x00, 0x00]);

        if query.len() > 12 {
            response.extend_from_slice(&query[12..]);
        }

        response.extend_from_slice(&[
            0xc0, 0x0c, // name pointer to question
            0x00, 0x01, // A
            0x00, 0x01, // IN
            0x00, 0x00, 0x00, 0x3c, // TTL 60
            0x00, 0x04, 10, 53, 0, 1,
        ]);

        response
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
