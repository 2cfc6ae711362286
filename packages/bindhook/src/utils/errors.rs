// packages/bindhook/src/utils/errors.rs
//! Error types for the shim
//!
//! Every failure here is reported once, at load time; the intercepted calls
//! themselves never surface these. Errors from the underlying bind/connect
//! implementations are passed through to the caller untouched.

use thiserror::Error;

/// Shim error type
#[derive(Debug, Error)]
pub enum ShimError {
    /// The configured address string could not be resolved
    #[error("could not resolve {0}")]
    ResolutionFailed(String),

    /// Resolution succeeded but returned no IPv4 datagram-capable result
    #[error("no IPv4 datagram address for {0}")]
    NoIpv4Address(String),

    /// A real libc symbol could not be located past this library
    #[error("unable to locate the real {0} implementation")]
    SymbolNotFound(&'static str),
}

/// Result type alias for shim operations
pub type Result<T> = std::result::Result<T, ShimError>;
