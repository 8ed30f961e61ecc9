use dnsplit_application::ports::DnsCodec;
use dnsplit_domain::{normalize_qname, DecodedMessage, DomainError};
use hickory_proto::op::{Message, MessageType};
use std::sync::Arc;

/// Decodes client datagrams with hickory-proto. Nothing is re-encoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct HickoryDnsCodec;

impl HickoryDnsCodec {
    pub fn new() -> Self {
        Self
    }
}

impl DnsCodec for HickoryDnsCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedMessage, DomainError> {
        let message =
            Message::from_vec(bytes).map_err(|e| DomainError::MalformedMessage(e.to_string()))?;

        // to_ascii keeps the labels as sent: no IDNA mapping, no lowercasing.
        let qname = message
            .queries()
            .first()
            .map(|query| Arc::from(normalize_qname(&query.name().to_ascii())));

        Ok(DecodedMessage {
            is_response: message.message_type() == MessageType::Response,
            qname,
        })
    }
}
