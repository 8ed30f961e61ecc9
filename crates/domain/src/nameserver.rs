use crate::errors::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

/// Port every nameserver is contacted on unless the config names another one.
pub const DNS_PORT: u16 = 53;

/// An upstream nameserver as written in the configuration.
///
/// Literal addresses are resolved at load time. Hostnames are kept as-is and
/// looked up by the forwarder on every exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Nameserver {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl Nameserver {
    pub fn port(&self) -> u16 {
        match self {
            Nameserver::Resolved(addr) => addr.port(),
            Nameserver::Unresolved { port, .. } => *port,
        }
    }
}

impl FromStr for Nameserver {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::InvalidNameserver(
                "nameserver cannot be empty".to_string(),
            ));
        }

        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(Nameserver::Resolved(addr));
        }

        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(Nameserver::Resolved(SocketAddr::new(ip, DNS_PORT)));
        }

        if s.contains(|c: char| c.is_whitespace() || c == '/' || c == ':') {
            return Err(DomainError::InvalidNameserver(s.to_string()));
        }

        Ok(Nameserver::Unresolved {
            hostname: Arc::from(s),
            port: DNS_PORT,
        })
    }
}

impl fmt::Display for Nameserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nameserver::Resolved(addr) if addr.port() == DNS_PORT => write!(f, "{}", addr.ip()),
            Nameserver::Resolved(addr) => write!(f, "{}", addr),
            Nameserver::Unresolved { hostname, .. } => write!(f, "{}", hostname),
        }
    }
}
