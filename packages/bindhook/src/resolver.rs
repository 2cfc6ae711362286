// packages/bindhook/src/resolver.rs
//! One-shot resolution of the configured source address
//!
//! Resolves a hostname or dotted literal to a single IPv4 address through
//! the platform resolver, restricted to datagram-capable IPv4 results. The
//! lookup runs once at load time; a failure permanently disables the
//! redirect feature for this process.

use crate::utils::errors::{Result, ShimError};
use std::ffi::{CStr, CString};
use std::mem;
use std::net::Ipv4Addr;
use std::ptr;

/// Resolve `host` to the first IPv4 datagram-capable address.
///
/// Goes through `getaddrinfo` with an `AF_INET`/`SOCK_DGRAM` hint so the
/// result matches what the host process itself would have observed.
pub fn resolve_ipv4(host: &str) -> Result<Ipv4Addr> {
    if host.is_empty() {
        return Err(ShimError::ResolutionFailed(
            "empty address string".to_string(),
        ));
    }
    let c_host = CString::new(host).map_err(|_| {
        ShimError::ResolutionFailed(format!("{host:?}: embedded NUL in address string"))
    })?;

    let mut hints: libc::addrinfo = unsafe { mem::zeroed() };
    hints.ai_family = libc::AF_INET;
    hints.ai_socktype = libc::SOCK_DGRAM;
    hints.ai_flags = libc::AI_ADDRCONFIG;

    let mut list: *mut libc::addrinfo = ptr::null_mut();
    let rc = unsafe { libc::getaddrinfo(c_host.as_ptr(), ptr::null(), &hints, &mut list) };
    if rc != 0 {
        return Err(ShimError::ResolutionFailed(format!(
            "{host:?}: {}",
            gai_detail(rc)
        )));
    }

    let mut found = None;
    let mut entry = list;
    while !entry.is_null() {
        let info = unsafe { &*entry };
        if info.ai_family == libc::AF_INET
            && !info.ai_addr.is_null()
            && info.ai_addrlen as usize >= mem::size_of::<libc::sockaddr_in>()
        {
            let sin = unsafe { ptr::read_unaligned(info.ai_addr as *const libc::sockaddr_in) };
            found = Some(Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr)));
            break;
        }
        entry = info.ai_next;
    }
    unsafe { libc::freeaddrinfo(list) };

    found.ok_or_else(|| ShimError::NoIpv4Address(format!("{host:?}")))
}

fn gai_detail(code: libc::c_int) -> String {
    let detail = unsafe { libc::gai_strerror(code) };
    if detail.is_null() {
        format!("getaddrinfo error {code}")
    } else {
        unsafe { CStr::from_ptr(detail) }.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_literal() {
        let addr = resolve_ipv4("127.0.0.1").unwrap();
        assert_eq!(addr, Ipv4Addr::LOCALHOST);
    }

    #[test]
    fn test_resolve_empty_input_fails() {
        assert!(resolve_ipv4("").is_err());
    }

    #[test]
    fn test_resolve_unknown_host_names_input() {
        let err = resolve_ipv4("no-such-host.invalid").unwrap_err();
        assert!(err.to_string().contains("no-such-host.invalid"));
    }
}
