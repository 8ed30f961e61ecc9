pub mod codec;
pub mod forwarding;
pub mod server;

pub use codec::HickoryDnsCodec;
pub use forwarding::{ReplySummary, UdpForwarder, FORWARD_TIMEOUT, MAX_REPLY_SIZE};
pub use server::{UdpDnsListener, MAX_DATAGRAM_SIZE, RECV_ERROR_BACKOFF, SHUTDOWN_GRACE};
