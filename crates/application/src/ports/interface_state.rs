use dnsplit_domain::DomainError;
use std::net::Ipv4Addr;

/// Live view of the host's network interfaces.
///
/// Implementations must not cache: interfaces come and go (VPN tunnels,
/// Wi-Fi roaming) and every call reflects the state at that moment.
pub trait InterfaceStateProvider: Send + Sync {
    /// Names of the interfaces currently known to the host.
    fn interface_names(&self) -> Result<Vec<String>, DomainError>;

    /// IPv4 addresses currently assigned to `interface`. Empty when there are
    /// none or when the interface does not exist.
    fn ipv4_addresses(&self, interface: &str) -> Result<Vec<Ipv4Addr>, DomainError>;
}
