use std::sync::Arc;

/// A client query accepted for forwarding.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub qname: Arc<str>,
    /// The datagram exactly as the client sent it.
    pub raw: Arc<[u8]>,
}

impl DnsRequest {
    pub fn new(qname: impl Into<Arc<str>>, raw: impl Into<Arc<[u8]>>) -> Self {
        Self {
            qname: qname.into(),
            raw: raw.into(),
        }
    }
}
