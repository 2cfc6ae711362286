// packages/bindhook/src/interception/hooks.rs
//! The two intercepted entry points and their decision logic
//!
//! `bind` and `connect` are exported with the exact POSIX signatures so the
//! library is a drop-in replacement when loaded ahead of libc. The decision
//! logic lives in `bind_redirected`/`connect_redirected`, generic over the
//! delegate callables, so it can be exercised with fakes that record what
//! would have reached the real implementations.

use super::classify::{classify, SocketKind};
use super::real::{REAL_BIND, REAL_CONNECT};
use super::sockaddr::{ipv4_of, to_sockaddr_in};
use crate::config::{self, RedirectSource};
use errno::{set_errno, Errno};
use libc::{c_int, sockaddr, sockaddr_in, socklen_t};
use std::mem;
use std::ptr;
use tracing::debug;

/// Intercepted `bind`. Rewrites the source address of IPv4 datagram binds
/// when the redirect feature is enabled; everything else passes through.
#[no_mangle]
pub unsafe extern "C" fn bind(fd: c_int, addr: *const sockaddr, len: socklen_t) -> c_int {
    let Some(real) = *REAL_BIND else {
        set_errno(Errno(libc::ENOSYS));
        return -1;
    };
    bind_redirected(
        |fd, addr, len| unsafe { real(fd, addr, len) },
        fd,
        addr,
        len,
        config::redirect(),
    )
}

/// Intercepted `connect`. Binds eligible datagram sockets to the configured
/// source endpoint before delegating the connect itself.
#[no_mangle]
pub unsafe extern "C" fn connect(fd: c_int, addr: *const sockaddr, len: socklen_t) -> c_int {
    let Some(real) = *REAL_CONNECT else {
        set_errno(Errno(libc::ENOSYS));
        return -1;
    };
    connect_redirected(
        |fd, addr, len| match *REAL_BIND {
            Some(real_bind) => unsafe { real_bind(fd, addr, len) },
            None => {
                set_errno(Errno(libc::ENOSYS));
                -1
            }
        },
        |fd, addr, len| unsafe { real(fd, addr, len) },
        fd,
        addr,
        len,
        config::redirect(),
    )
}

/// Decide and perform the bind rewrite, then delegate.
///
/// Eligibility: redirect configured, descriptor is a datagram socket, and
/// the caller's address is IPv4. An eligible call delegates a copy of the
/// caller's endpoint with only the address field replaced; the caller's
/// port, family and length travel unchanged. Ineligible calls delegate the
/// caller's pointer untouched. The delegate's result and errno are returned
/// verbatim either way.
///
/// # Safety
/// `addr` must either be null or point to at least `len` readable bytes.
pub unsafe fn bind_redirected<F>(
    real_bind: F,
    fd: c_int,
    addr: *const sockaddr,
    len: socklen_t,
    redirect: Option<&RedirectSource>,
) -> c_int
where
    F: FnOnce(c_int, *const sockaddr, socklen_t) -> c_int,
{
    let Some(redirect) = redirect else {
        return real_bind(fd, addr, len);
    };
    if classify(fd) != SocketKind::Datagram {
        return real_bind(fd, addr, len);
    }
    let Some(requested) = ipv4_of(addr, len) else {
        return real_bind(fd, addr, len);
    };

    let mut rewritten = ptr::read_unaligned(addr as *const sockaddr_in);
    rewritten.sin_addr = libc::in_addr {
        s_addr: u32::from_ne_bytes(redirect.address.octets()),
    };
    debug!(fd, from = %requested, to = %redirect.address, "rewriting datagram bind");
    real_bind(fd, &rewritten as *const sockaddr_in as *const sockaddr, len)
}

/// Decide and perform the implicit source bind, then delegate the connect.
///
/// Eligible calls (same conditions as `bind_redirected`) first bind the
/// descriptor to the configured endpoint with port zero so the operating
/// system picks a free port. If that bind fails its error is returned and
/// the connect is never attempted; the descriptor stays in whatever state
/// the failed bind left. The connect itself always carries the caller's
/// original destination.
///
/// # Safety
/// `addr` must either be null or point to at least `len` readable bytes.
pub unsafe fn connect_redirected<B, C>(
    real_bind: B,
    real_connect: C,
    fd: c_int,
    addr: *const sockaddr,
    len: socklen_t,
    redirect: Option<&RedirectSource>,
) -> c_int
where
    B: FnOnce(c_int, *const sockaddr, socklen_t) -> c_int,
    C: FnOnce(c_int, *const sockaddr, socklen_t) -> c_int,
{
    let Some(redirect) = redirect else {
        return real_connect(fd, addr, len);
    };
    if classify(fd) != SocketKind::Datagram {
        return real_connect(fd, addr, len);
    }
    let Some(destination) = ipv4_of(addr, len) else {
        return real_connect(fd, addr, len);
    };

    let local = to_sockaddr_in(redirect.local_endpoint);
    let rc = real_bind(
        fd,
        &local as *const sockaddr_in as *const sockaddr,
        mem::size_of::<sockaddr_in>() as socklen_t,
    );
    if rc != 0 {
        debug!(fd, source = %redirect.address, "implicit bind failed, connect aborted");
        return rc;
    }
    debug!(fd, source = %redirect.address, to = %destination, "bound datagram source before connect");
    real_connect(fd, addr, len)
}
