use dnsplit_domain::{Condition, LinkState};
use std::sync::Arc;
use tracing::{trace, warn};

use crate::ports::InterfaceStateProvider;

/// Answers whether a [`Condition`] holds right now.
///
/// Interface state is read on every call. An interface that does not exist
/// satisfies no condition, `down` included. Failures to query the host are
/// logged and count as "not met" so a broken lookup never takes routing down.
pub struct ConditionEvaluator {
    interfaces: Arc<dyn InterfaceStateProvider>,
}

impl ConditionEvaluator {
    pub fn new(interfaces: Arc<dyn InterfaceStateProvider>) -> Self {
        Self { interfaces }
    }

    pub fn is_met(&self, condition: &Condition) -> bool {
        let interface = condition.interface();

        let names = match self.interfaces.interface_names() {
            Ok(names) => names,
            Err(e) => {
                warn!(interface = %interface, error = %e, "Failed to list network interfaces");
                return false;
            }
        };

        if !names.iter().any(|name| name == interface) {
            trace!(interface = %interface, "Interface not present, condition not met");
            return false;
        }

        let addresses = match self.interfaces.ipv4_addresses(interface) {
            Ok(addresses) => addresses,
            Err(e) => {
                warn!(interface = %interface, error = %e, "Failed to read interface addresses");
                return false;
            }
        };

        let met = match condition {
            Condition::InterfaceState { wanted, .. } => match wanted {
                LinkState::Up => !addresses.is_empty(),
                LinkState::Down => addresses.is_empty(),
            },
            Condition::NetworkMembership { network, .. } => {
                addresses.iter().any(|addr| network.contains(*addr))
            }
        };

        trace!(condition = %condition, addresses = addresses.len(), met, "Condition evaluated");
        met
    }
}
