//! dnsplit Domain Layer
pub mod condition;
pub mod config;
pub mod dns_message;
pub mod dns_request;
pub mod domain_pattern;
pub mod errors;
pub mod nameserver;
pub mod routing_table;
pub mod rule;

pub use condition::{Condition, LinkState, NetworkSet};
pub use config::{CliOverrides, Config, ConfigError, RuleConfig};
pub use dns_message::{normalize_qname, DecodedMessage};
pub use dns_request::DnsRequest;
pub use domain_pattern::DomainPattern;
pub use errors::DomainError;
pub use nameserver::{Nameserver, DNS_PORT};
pub use routing_table::RoutingTable;
pub use rule::{Rule, RuleMatch};
