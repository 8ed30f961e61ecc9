#![allow(dead_code)]
use dnsplit_application::services::{ConditionEvaluator, RuleEngine};
use dnsplit_application::use_cases::HandleDatagramUseCase;
use dnsplit_domain::Config;
use dnsplit_infrastructure::dns::{HickoryDnsCodec, UdpDnsListener, UdpForwarder};
use dnsplit_infrastructure::random::SeededRandom;
use dnsplit_infrastructure::system::SystemInterfaces;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;

/// Loopback upstream that answers every query with its own header bit flipped
/// and a one-byte tag appended, so tests can tell upstreams apart.
pub struct Upstream {
    pub addr: SocketAddr,
    pub tag: u8,
    hits: Arc<AtomicUsize>,
    shutdown: CancellationToken,
}

impl Upstream {
    pub async fn start(tag: u8) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let shutdown = CancellationToken::new();

        let counter = Arc::clone(&hits);
        let stop = shutdown.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 2048];
            loop {
                tokio::select! {
                    _ = stop.cancelled() => break,
                    received = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = received else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        let mut reply = buf[..len].to_vec();
                        if reply.len() > 2 {
                            reply[2] |= 0x80;
                        }
                        reply.push(tag);
                        let _ = socket.send_to(&reply, peer).await;
                    }
                }
            }
        });

        Self {
            addr,
            tag,
            hits,
            shutdown,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for Upstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Full production stack on an ephemeral loopback port.
pub struct Forwarder {
    pub addr: SocketAddr,
    shutdown: CancellationToken,
}

impl Forwarder {
    pub async fn start(config: &Config) -> Self {
        config.validate().unwrap();

        let engine = RuleEngine::new(
            Arc::new(config.routing_table().unwrap()),
            ConditionEvaluator::new(Arc::new(SystemInterfaces::new())),
            Arc::new(SeededRandom::new(1)),
        );
        let handler = Arc::new(HandleDatagramUseCase::new(
            Arc::new(HickoryDnsCodec::new()),
            Arc::new(engine),
            Arc::new(UdpForwarder::with_timeout(Duration::from_millis(500))),
        ));

        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let shutdown = CancellationToken::new();
        let listener = UdpDnsListener::new(
            socket,
            handler,
            config.server.max_concurrent_requests,
            shutdown.clone(),
        );
        let addr = listener.local_addr().unwrap();
        tokio::spawn(listener.run());

        Self { addr, shutdown }
    }

    /// Resolves `name` through the forwarder and returns the upstream's tag.
    pub async fn resolve(&self, name: &str) -> Option<u8> {
        let query = query(name);
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(&query, self.addr).await.unwrap();

        let mut buf = vec![0u8; 2048];
        let (len, _) = tokio::time::timeout(Duration::from_secs(2), client.recv_from(&mut buf))
            .await
            .ok()?
            .ok()?;

        assert_eq!(&buf[..2], &query[..2], "transaction id must be preserved");
        assert_eq!(len, query.len() + 1);
        Some(buf[len - 1])
    }
}

impl Drop for Forwarder {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

pub fn query(name: &str) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(0xbeef)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), RecordType::A));
    message.to_vec().unwrap()
}
