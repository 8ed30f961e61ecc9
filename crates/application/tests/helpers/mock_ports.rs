#![allow(dead_code)]

use async_trait::async_trait;
use dnsplit_application::ports::{
    DnsCodec, ForwardResult, InterfaceStateProvider, RandomSource, UpstreamForwarder,
};
use dnsplit_domain::{DecodedMessage, DomainError, Nameserver};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

// ── Interfaces ─────────────────────────────────────────────────────────────

/// In-memory interface table. Mutations are visible to the next evaluation.
#[derive(Clone, Default)]
pub struct StaticInterfaces {
    interfaces: Arc<RwLock<HashMap<String, Vec<Ipv4Addr>>>>,
    failing: Arc<RwLock<bool>>,
    lookups: Arc<AtomicUsize>,
}

impl StaticInterfaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: &str, addresses: &[&str]) -> Self {
        self.set(name, addresses);
        self
    }

    pub fn set(&self, name: &str, addresses: &[&str]) {
        let addresses = addresses.iter().map(|a| a.parse().unwrap()).collect();
        self.interfaces
            .write()
            .unwrap()
            .insert(name.to_string(), addresses);
    }

    pub fn remove(&self, name: &str) {
        self.interfaces.write().unwrap().remove(name);
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.write().unwrap() = failing;
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl InterfaceStateProvider for StaticInterfaces {
    fn interface_names(&self) -> Result<Vec<String>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if *self.failing.read().unwrap() {
            return Err(DomainError::InterfaceQuery("mock failure".to_string()));
        }
        Ok(self.interfaces.read().unwrap().keys().cloned().collect())
    }

    fn ipv4_addresses(&self, interface: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        Ok(self
            .interfaces
            .read()
            .unwrap()
            .get(interface)
            .cloned()
            .unwrap_or_default())
    }
}

// ── Randomness ─────────────────────────────────────────────────────────────

/// Replays a fixed sequence of picks (wrapping) and records each `len` asked.
#[derive(Clone)]
pub struct SequenceRandom {
    picks: Arc<Vec<usize>>,
    cursor: Arc<AtomicUsize>,
    asked: Arc<RwLock<Vec<usize>>>,
}

impl SequenceRandom {
    pub fn new(picks: Vec<usize>) -> Self {
        Self {
            picks: Arc::new(picks),
            cursor: Arc::new(AtomicUsize::new(0)),
            asked: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn first() -> Self {
        Self::new(vec![0])
    }

    pub fn asked(&self) -> Vec<usize> {
        self.asked.read().unwrap().clone()
    }
}

impl RandomSource for SequenceRandom {
    fn pick(&self, len: usize) -> usize {
        self.asked.write().unwrap().push(len);
        let i = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.picks[i % self.picks.len()] % len
    }
}

// ── Codec ──────────────────────────────────────────────────────────────────

/// Decodes only the datagrams it has been taught; anything else is malformed.
#[derive(Clone, Default)]
pub struct MockCodec {
    messages: Arc<RwLock<HashMap<Vec<u8>, DecodedMessage>>>,
}

impl MockCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teach(&self, datagram: &[u8], message: DecodedMessage) {
        self.messages
            .write()
            .unwrap()
            .insert(datagram.to_vec(), message);
    }
}

impl DnsCodec for MockCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedMessage, DomainError> {
        self.messages
            .read()
            .unwrap()
            .get(bytes)
            .cloned()
            .ok_or_else(|| DomainError::MalformedMessage("unknown datagram".to_string()))
    }
}

// ── Forwarder ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub enum ForwardBehavior {
    /// Reply with these bytes.
    Reply(Vec<u8>),
    /// Echo the query back.
    Echo,
    Timeout,
    Transport(String),
}

/// Records every exchange and answers according to its behavior.
#[derive(Clone)]
pub struct MockForwarder {
    behavior: Arc<RwLock<ForwardBehavior>>,
    exchanges: Arc<RwLock<Vec<(Vec<u8>, Nameserver)>>>,
}

impl MockForwarder {
    pub fn new(behavior: ForwardBehavior) -> Self {
        Self {
            behavior: Arc::new(RwLock::new(behavior)),
            exchanges: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn echo() -> Self {
        Self::new(ForwardBehavior::Echo)
    }

    pub fn set_behavior(&self, behavior: ForwardBehavior) {
        *self.behavior.write().unwrap() = behavior;
    }

    pub fn exchanges(&self) -> Vec<(Vec<u8>, Nameserver)> {
        self.exchanges.read().unwrap().clone()
    }

    pub fn servers(&self) -> Vec<String> {
        self.exchanges()
            .into_iter()
            .map(|(_, ns)| ns.to_string())
            .collect()
    }
}

#[async_trait]
impl UpstreamForwarder for MockForwarder {
    async fn exchange(&self, query: &[u8], nameserver: &Nameserver) -> ForwardResult {
        self.exchanges
            .write()
            .unwrap()
            .push((query.to_vec(), nameserver.clone()));

        let behavior = self.behavior.read().unwrap().clone();
        match behavior {
            ForwardBehavior::Reply(bytes) => Ok(bytes),
            ForwardBehavior::Echo => Ok(query.to_vec()),
            ForwardBehavior::Timeout => Err(DomainError::ForwardTimeout {
                server: nameserver.to_string(),
            }),
            ForwardBehavior::Transport(reason) => Err(DomainError::ForwardTransport {
                server: nameserver.to_string(),
                reason,
            }),
        }
    }
}
