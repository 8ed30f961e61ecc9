use std::sync::Arc;

/// The parts of a decoded DNS message the forwarder looks at.
///
/// Everything else in the datagram is opaque and travels upstream untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    /// QR header bit: `false` for a query, `true` for a response.
    pub is_response: bool,
    /// Name of the first question, trailing root dot stripped.
    pub qname: Option<Arc<str>>,
}

impl DecodedMessage {
    pub fn query(qname: impl Into<Arc<str>>) -> Self {
        Self {
            is_response: false,
            qname: Some(qname.into()),
        }
    }

    pub fn response(qname: impl Into<Arc<str>>) -> Self {
        Self {
            is_response: true,
            qname: Some(qname.into()),
        }
    }

    pub fn is_query(&self) -> bool {
        !self.is_response
    }
}

/// Strips the trailing root label dot. Case and inner dots are left alone.
pub fn normalize_qname(name: &str) -> &str {
    name.trim_end_matches('.')
}
