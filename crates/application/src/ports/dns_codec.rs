use dnsplit_domain::{DecodedMessage, DomainError};

/// Read-only DNS wire decoding.
pub trait DnsCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedMessage, DomainError>;
}
