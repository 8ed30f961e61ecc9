mod forwarder;
mod reply_summary;

pub use forwarder::{UdpForwarder, FORWARD_TIMEOUT, MAX_REPLY_SIZE};
pub use reply_summary::ReplySummary;
