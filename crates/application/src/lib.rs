//! dnsplit Application Layer
//!
//! Routing decisions and the per-datagram request flow. Everything that
//! touches the network or the host lives behind the traits in [`ports`].
pub mod ports;
pub mod services;
pub mod use_cases;
