use hickory_proto::op::Message;
use std::fmt;

/// Human-readable digest of an upstream reply, for logs only.
///
/// The forwarder never alters reply bytes; this is decoded from a copy and
/// thrown away after logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplySummary {
    pub rcode: String,
    pub answers: usize,
    pub first_answer: Option<String>,
}

impl ReplySummary {
    /// `None` when the bytes do not decode as a DNS message.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let message = Message::from_vec(bytes).ok()?;

        let first_answer = message
            .answers()
            .first()
            .map(|record| format!("{} {}", record.record_type(), record.data()));

        Some(Self {
            rcode: format!("{:?}", message.response_code()),
            answers: message.answers().len(),
            first_answer,
        })
    }
}

impl fmt::Display for ReplySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} answers", self.rcode, self.answers)?;
        if let Some(first) = &self.first_answer {
            write!(f, ", first: {}", first)?;
        }
        f.write_str(")")
    }
}
