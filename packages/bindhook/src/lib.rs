// packages/bindhook/src/lib.rs
//! Sentra Bindhook
//!
//! An `LD_PRELOAD` library that forces the UDP traffic of an unmodified
//! program to originate from a configured local source address. The address
//! is taken from the `SENTRA_BIND_ADDR` environment variable (hostname or
//! IPv4 literal), resolved once when the library is loaded.
//!
//! # Architecture
//!
//! - **resolver**: one-shot hostname/literal resolution to an IPv4 address
//! - **config**: process-wide redirect configuration, set once at load time
//! - **interception**: the `bind`/`connect` hooks and their delegate table
//! - **utils**: errors and common helpers
//!
//! Usage:
//!   SENTRA_BIND_ADDR="203.0.113.5" \
//!     LD_PRELOAD=/path/to/libsentra_bindhook.so \
//!     <command>
//!
//! Sockets that are not IPv4 datagram sockets are never touched; without
//! `SENTRA_BIND_ADDR` every intercepted call is a pure passthrough.

pub mod config;
pub mod interception;
pub mod resolver;
pub mod utils;

// Re-export commonly used types
pub use config::RedirectSource;
pub use interception::classify::{classify, SocketKind};
pub use utils::errors::{Result, ShimError};

use once_cell::sync::Lazy;
use std::ffi::{c_char, CString};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_HASH: &str = env!("GIT_HASH");

/// Library build information
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub rustc_version: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            git_hash: GIT_HASH,
            build_timestamp: env!("BUILD_TIMESTAMP"),
            rustc_version: env!("RUSTC_VERSION"),
        }
    }
}

/// Export the version as a C string so operators can verify which build a
/// process actually loaded.
#[no_mangle]
pub extern "C" fn bindhook_version() -> *const c_char {
    static VERSION_CSTR: Lazy<CString> = Lazy::new(|| {
        CString::new(format!("{} (built {}, git {})", VERSION, env!("BUILD_TIMESTAMP"), GIT_HASH))
            .unwrap_or_else(|_| CString::new("unknown").unwrap())
    });
    VERSION_CSTR.as_ptr()
}

/// Library initialization, run by the dynamic loader before any application
/// code. The loader guarantees this is single threaded; everything it sets
/// up is read-only afterwards.
#[ctor::ctor]
fn init() {
    if let Ok(filter) = std::env::var(config::LOG_ENV) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
            .with_writer(std::io::stderr)
            .try_init();
    }

    interception::real::initialize();
    config::initialize();
}
