//! Host interface state via `if_nameindex(3)` and `getifaddrs(3)`.
//!
//! Both calls return C-allocated lists; the guards below free them on drop so
//! every early return releases the memory.

use dnsplit_application::ports::InterfaceStateProvider;
use dnsplit_domain::DomainError;
use std::ffi::CStr;
use std::io;
use std::net::Ipv4Addr;
use tracing::trace;

/// Reads interface state from the running kernel on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInterfaces;

impl SystemInterfaces {
    pub fn new() -> Self {
        Self
    }
}

impl InterfaceStateProvider for SystemInterfaces {
    fn interface_names(&self) -> Result<Vec<String>, DomainError> {
        let index = NameIndex::new()?;
        let names = index.names();
        trace!(count = names.len(), "Listed network interfaces");
        Ok(names)
    }

    fn ipv4_addresses(&self, interface: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        let ifaddrs = IfAddrs::new()?;
        Ok(ifaddrs.ipv4_for(interface))
    }
}

struct NameIndex(*mut libc::if_nameindex);

impl NameIndex {
    fn new() -> Result<Self, DomainError> {
        let head = unsafe { libc::if_nameindex() };
        if head.is_null() {
            return Err(DomainError::InterfaceQuery(format!(
                "if_nameindex: {}",
                io::Error::last_os_error()
            )));
        }
        Ok(Self(head))
    }

    fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut entry = self.0;
        // The array ends with an entry whose index is 0 and name is null.
        loop {
            let current = unsafe { &*entry };
            if current.if_index == 0 || current.if_name.is_null() {
                break;
            }
            let name = unsafe { CStr::from_ptr(current.if_name) };
            names.push(name.to_string_lossy().into_owned());
            entry = unsafe { entry.add(1) };
        }
        names
    }
}

impl Drop for NameIndex {
    fn drop(&mut self) {
        unsafe { libc::if_freenameindex(self.0) };
    }
}

struct IfAddrs(*mut libc::ifaddrs);

impl IfAddrs {
    fn new() -> Result<Self, DomainError> {
        let mut head: *mut libc::ifaddrs = std::ptr::null_mut();
        if unsafe { libc::getifaddrs(&mut head) } != 0 {
            return Err(DomainError::InterfaceQuery(format!(
                "getifaddrs: {}",
                io::Error::last_os_error()
            )));
        }
        Ok(Self(head))
    }

    fn ipv4_for(&self, interface: &str) -> Vec<Ipv4Addr> {
        let mut addresses = Vec::new();
        let mut cursor = self.0;

        while !cursor.is_null() {
            let entry = unsafe { &*cursor };
            cursor = entry.ifa_next;

            if entry.ifa_name.is_null() || entry.ifa_addr.is_null() {
                continue;
            }
            let name = unsafe { CStr::from_ptr(entry.ifa_name) };
            if name.to_bytes() != interface.as_bytes() {
                continue;
            }
            let family = unsafe { (*entry.ifa_addr).sa_family };
            if libc::c_int::from(family) != libc::AF_INET {
                continue;
            }

            let sin = unsafe { &*(entry.ifa_addr as *const libc::sockaddr_in) };
            addresses.push(Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr)));
        }

        addresses
    }
}

impl Drop for IfAddrs {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe { libc::freeifaddrs(self.0) };
        }
    }
}
