// packages/bindhook/src/config.rs
//! Process-wide redirect configuration
//!
//! Read from the environment exactly once, during load-time initialization,
//! and immutable afterwards. Readers are lock-free and non-blocking: a hook
//! that fires while initialization is still in flight (the resolver's own
//! DNS traffic re-enters the hooks) observes "disabled" instead of waiting
//! on the cell.

use crate::resolver;
use crate::utils::errors::Result;
use once_cell::sync::OnceCell;
use std::env;
use std::net::{Ipv4Addr, SocketAddrV4};

/// Environment variable naming the source address (hostname or IPv4 literal)
pub const BIND_ADDR_ENV: &str = "SENTRA_BIND_ADDR";

/// Environment variable enabling diagnostic logging (tracing env-filter syntax)
pub const LOG_ENV: &str = "SENTRA_BINDHOOK_LOG";

/// The resolved redirect target for this process
#[derive(Debug, Clone)]
pub struct RedirectSource {
    /// The configuration string as supplied by the operator
    pub requested: String,

    /// The address every eligible bind is rewritten to
    pub address: Ipv4Addr,

    /// Local endpoint used for implicit pre-connect binds; the port is
    /// zero so the operating system assigns one
    pub local_endpoint: SocketAddrV4,
}

impl RedirectSource {
    /// Resolve a configuration string into a usable redirect target.
    pub fn resolve(requested: &str) -> Result<Self> {
        let address = resolver::resolve_ipv4(requested)?;
        Ok(Self {
            requested: requested.to_string(),
            address,
            local_endpoint: SocketAddrV4::new(address, 0),
        })
    }
}

static REDIRECT: OnceCell<Option<RedirectSource>> = OnceCell::new();

/// Resolve the configured address, once. Called from the load-time
/// constructor; later calls are no-ops.
pub(crate) fn initialize() {
    REDIRECT.get_or_init(|| {
        let requested = env::var(BIND_ADDR_ENV).ok()?;
        match RedirectSource::resolve(&requested) {
            Ok(source) => {
                println!("[bindhook] redirecting udp source address to {}", source.address);
                Some(source)
            }
            Err(err) => {
                eprintln!("[bindhook] {err}");
                None
            }
        }
    });
}

/// The active redirect target, or `None` while disabled or uninitialized.
pub(crate) fn redirect() -> Option<&'static RedirectSource> {
    REDIRECT.get().and_then(Option::as_ref)
}
