// packages/bindhook/src/interception/classify.rs
//! Transport-type classification of socket descriptors

use libc::{c_int, c_void, socklen_t, SOCK_DGRAM, SOCK_STREAM, SOL_SOCKET, SO_TYPE};
use std::mem;
use std::os::unix::io::RawFd;

/// Transport type of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketKind {
    /// Connectionless, message-oriented (UDP)
    Datagram,

    /// Connection-oriented byte stream (TCP)
    Stream,

    /// Anything else, including descriptors that are not sockets
    Other,
}

/// Query a descriptor's own `SO_TYPE` attribute. Read-only; a failed query
/// (not a socket, stale descriptor) classifies as `Other`, which makes the
/// descriptor ineligible for rewriting.
pub fn classify(fd: RawFd) -> SocketKind {
    let mut kind: c_int = 0;
    let mut len = mem::size_of::<c_int>() as socklen_t;
    let rc = unsafe {
        libc::getsockopt(
            fd,
            SOL_SOCKET,
            SO_TYPE,
            &mut kind as *mut c_int as *mut c_void,
            &mut len,
        )
    };
    if rc != 0 {
        return SocketKind::Other;
    }
    match kind {
        SOCK_DGRAM => SocketKind::Datagram,
        SOCK_STREAM => SocketKind::Stream,
        _ => SocketKind::Other,
    }
}
