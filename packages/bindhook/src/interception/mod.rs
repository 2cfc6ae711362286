// packages/bindhook/src/interception/mod.rs
//! Socket-call interception layer
//!
//! Exports `bind` and `connect` symbols that shadow the C library's when
//! this object is loaded ahead of it, and delegates to the genuine
//! implementations captured at load time:
//!
//! - **real**: delegate table, resolved once via `dlsym(RTLD_NEXT, ...)`
//! - **classify**: transport-type query for eligibility decisions
//! - **sockaddr**: checked views over the caller's address structures
//! - **hooks**: the two ABI entry points and their decision logic
//!
//! ```text
//! Host Application (Unmodified)
//!     │
//!     ├─ bind(fd, addr)    → datagram + IPv4? rewrite source → real bind
//!     └─ connect(fd, addr) → datagram + IPv4? implicit source bind → real connect
//! ```
//!
//! Every ineligible call reaches the real implementation with the caller's
//! arguments untouched, and results travel back verbatim.

pub mod classify;
pub mod hooks;
pub(crate) mod real;
pub mod sockaddr;

// Re-export commonly used types
pub use classify::SocketKind;
pub use hooks::{bind_redirected, connect_redirected};
