// packages/bindhook/src/interception/sockaddr.rs
//! Checked views over the caller's socket address structures
//!
//! Callers hand the hooks raw `sockaddr` pointers with a separate length;
//! nothing here reads past the declared length or assumes alignment.

use libc::{sockaddr, sockaddr_in, socklen_t, AF_INET};
use std::mem;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::ptr;

/// Interpret a caller-supplied address as IPv4, if it is one.
///
/// Returns `None` for null pointers, lengths too short to hold a
/// `sockaddr_in`, or non-`AF_INET` families.
///
/// # Safety
/// `addr` must either be null or point to at least `len` readable bytes.
pub unsafe fn ipv4_of(addr: *const sockaddr, len: socklen_t) -> Option<SocketAddrV4> {
    if addr.is_null() || (len as usize) < mem::size_of::<sockaddr_in>() {
        return None;
    }
    if ptr::read_unaligned(ptr::addr_of!((*addr).sa_family)) != AF_INET as libc::sa_family_t {
        return None;
    }
    let sin = ptr::read_unaligned(addr as *const sockaddr_in);
    Some(from_sockaddr_in(&sin))
}

/// Convert a wire-format `sockaddr_in` to its std representation.
pub fn from_sockaddr_in(sin: &sockaddr_in) -> SocketAddrV4 {
    let ip = Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr));
    SocketAddrV4::new(ip, u16::from_be(sin.sin_port))
}

/// Build a wire-format `sockaddr_in` for an endpoint.
pub fn to_sockaddr_in(addr: SocketAddrV4) -> sockaddr_in {
    let mut sin: sockaddr_in = unsafe { mem::zeroed() };
    sin.sin_family = AF_INET as libc::sa_family_t;
    sin.sin_port = addr.port().to_be();
    sin.sin_addr = libc::in_addr {
        // octets() are big-endian; native-endian reinterpretation keeps
        // the in-memory representation in network order
        s_addr: u32::from_ne_bytes(addr.ip().octets()),
    };
    sin
}

#[cfg(test)]
mod tests {
    use super::*;
    use libc::sockaddr_in6;

    #[test]
    fn test_endpoint_round_trips() {
        let endpoint = SocketAddrV4::new(Ipv4Addr::new(203, 0, 113, 5), 4242);
        let sin = to_sockaddr_in(endpoint);
        assert_eq!(sin.sin_family, AF_INET as libc::sa_family_t);
        assert_eq!(from_sockaddr_in(&sin), endpoint);
    }

    #[test]
    fn test_ipv4_of_reads_caller_address() {
        let sin = to_sockaddr_in(SocketAddrV4::new(Ipv4Addr::new(198, 51, 100, 9), 53));
        let parsed = unsafe {
            ipv4_of(
                &sin as *const sockaddr_in as *const sockaddr,
                mem::size_of::<sockaddr_in>() as socklen_t,
            )
        };
        assert_eq!(parsed, Some(SocketAddrV4::new(Ipv4Addr::new(198, 51, 100, 9), 53)));
    }

    #[test]
    fn test_ipv4_of_rejects_null() {
        assert_eq!(unsafe { ipv4_of(ptr::null(), 16) }, None);
    }

    #[test]
    fn test_ipv4_of_rejects_short_length() {
        let sin = to_sockaddr_in(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 1));
        let parsed = unsafe { ipv4_of(&sin as *const sockaddr_in as *const sockaddr, 4) };
        assert_eq!(parsed, None);
    }

    #[test]
    fn test_ipv4_of_rejects_other_families() {
        let mut sin6: sockaddr_in6 = unsafe { mem::zeroed() };
        sin6.sin6_family = libc::AF_INET6 as libc::sa_family_t;
        let parsed = unsafe {
            ipv4_of(
                &sin6 as *const sockaddr_in6 as *const sockaddr,
                mem::size_of::<sockaddr_in6>() as socklen_t,
            )
        };
        assert_eq!(parsed, None);
    }
}
