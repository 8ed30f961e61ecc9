use crate::ports::{DnsCodec, UpstreamForwarder};
use crate::services::RuleEngine;
use dnsplit_domain::{DnsRequest, DomainError};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Not a DNS message, or a query without a question.
    Malformed,
    /// QR bit set: someone sent us a response.
    NotAQuery,
}

/// What the listener should do with a datagram once it has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Ignore it. Nothing is sent back.
    Dropped(DropReason),
    /// Send these bytes back to the client unchanged.
    Replied(Vec<u8>),
    /// Forwarding failed. The client gets no reply and retries on its own.
    Silent(DomainError),
}

impl RequestOutcome {
    pub fn reply(&self) -> Option<&[u8]> {
        match self {
            RequestOutcome::Replied(bytes) => Some(bytes),
            _ => None,
        }
    }
}

pub struct HandleDatagramUseCase {
    codec: Arc<dyn DnsCodec>,
    rules: Arc<RuleEngine>,
    forwarder: Arc<dyn UpstreamForwarder>,
}

impl HandleDatagramUseCase {
    pub fn new(
        codec: Arc<dyn DnsCodec>,
        rules: Arc<RuleEngine>,
        forwarder: Arc<dyn UpstreamForwarder>,
    ) -> Self {
        Self {
            codec,
            rules,
            forwarder,
        }
    }

    pub async fn execute(&self, datagram: Arc<[u8]>) -> RequestOutcome {
        let request = match self.accept(&datagram) {
            Ok(qname) => DnsRequest::new(qname, datagram),
            Err(reason) => return RequestOutcome::Dropped(reason),
        };

        let route = self.rules.route(&request.qname);
        debug!(
            domain = %request.qname,
            rule = route.rule.unwrap_or("default"),
            server = %route.nameserver,
            "Forwarding query"
        );

        match self.forwarder.exchange(&request.raw, route.nameserver).await {
            Ok(reply) => RequestOutcome::Replied(reply),
            Err(e) => {
                warn!(
                    domain = %request.qname,
                    server = %route.nameserver,
                    error = %e,
                    "Query not answered"
                );
                RequestOutcome::Silent(e)
            }
        }
    }

    fn accept(&self, datagram: &[u8]) -> Result<Arc<str>, DropReason> {
        let message = self.codec.decode(datagram).map_err(|e| {
            debug!(bytes = datagram.len(), error = %e, "Dropping undecodable datagram");
            DropReason::Malformed
        })?;

        if message.is_response {
            debug!(bytes = datagram.len(), "Dropping datagram with QR bit set");
            return Err(DropReason::NotAQuery);
        }

        message.qname.ok_or_else(|| {
            debug!(bytes = datagram.len(), "Dropping query without a question");
            DropReason::Malformed
        })
    }
}
