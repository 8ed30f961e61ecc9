mod dns_codec;
mod interface_state;
mod random_source;
mod upstream_forwarder;

pub use dns_codec::DnsCodec;
pub use interface_state::InterfaceStateProvider;
pub use random_source::RandomSource;
pub use upstream_forwarder::{ForwardResult, UpstreamForwarder};
