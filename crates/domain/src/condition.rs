use crate::errors::DomainError;
use ipnetwork::IpNetwork;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Up,
    Down,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkState::Up => f.write_str("up"),
            LinkState::Down => f.write_str("down"),
        }
    }
}

/// One or more IP networks. A bare address is a single-host network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSet {
    networks: Vec<IpNetwork>,
}

impl NetworkSet {
    pub fn new(networks: Vec<IpNetwork>) -> Result<Self, DomainError> {
        if networks.is_empty() {
            return Err(DomainError::InvalidNetwork(
                "network set cannot be empty".to_string(),
            ));
        }
        Ok(Self { networks })
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let ip = IpAddr::V4(addr);
        self.networks.iter().any(|network| network.contains(ip))
    }

    pub fn networks(&self) -> &[IpNetwork] {
        &self.networks
    }
}

impl FromStr for NetworkSet {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let networks = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<IpNetwork>()
                    .map_err(|e| DomainError::InvalidNetwork(format!("{}: {}", part, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(networks)
    }
}

impl fmt::Display for NetworkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, network) in self.networks.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", network)?;
        }
        Ok(())
    }
}

/// Routing condition evaluated against live interface state.
///
/// Written in the config as `"<interface> up"`, `"<interface> down"` or
/// `"<interface> <network>[,<network>...]"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    InterfaceState {
        interface: Arc<str>,
        wanted: LinkState,
    },
    NetworkMembership {
        interface: Arc<str>,
        network: NetworkSet,
    },
}

impl Condition {
    pub fn interface(&self) -> &str {
        match self {
            Condition::InterfaceState { interface, .. }
            | Condition::NetworkMembership { interface, .. } => interface,
        }
    }
}

impl FromStr for Condition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [interface, param] = parts.as_slice() else {
            return Err(DomainError::InvalidCondition(format!(
                "expected '<interface> <up|down|network>', got '{}'",
                s
            )));
        };

        let interface: Arc<str> = Arc::from(*interface);

        match *param {
            "up" => Ok(Condition::InterfaceState {
                interface,
                wanted: LinkState::Up,
            }),
            "down" => Ok(Condition::InterfaceState {
                interface,
                wanted: LinkState::Down,
            }),
            network => Ok(Condition::NetworkMembership {
                interface,
                network: network.parse()?,
            }),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::InterfaceState { interface, wanted } => {
                write!(f, "{} {}", interface, wanted)
            }
            Condition::NetworkMembership { interface, network } => {
                write!(f, "{} {}", interface, network)
            }
        }
    }
}
