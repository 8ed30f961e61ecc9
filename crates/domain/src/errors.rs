use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Invalid domain pattern '{pattern}': {reason}")]
    InvalidDomainPattern { pattern: String, reason: String },

    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    #[error("Invalid network specification: {0}")]
    InvalidNetwork(String),

    #[error("Invalid nameserver: {0}")]
    InvalidNameserver(String),

    #[error("Failed to query network interfaces: {0}")]
    InterfaceQuery(String),

    #[error("Forward timeout waiting for {server}")]
    ForwardTimeout { server: String },

    #[error("Forward to {server} failed: {reason}")]
    ForwardTransport { server: String, reason: String },
}
