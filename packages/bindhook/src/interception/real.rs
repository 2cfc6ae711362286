// packages/bindhook/src/interception/real.rs
//! Delegate table for the genuine libc implementations
//!
//! Symbols are looked up with `dlsym(RTLD_NEXT, ...)` so the search starts
//! after this library in the process's resolution order. Each capture runs
//! once and is never reassigned.

use crate::utils::errors::ShimError;
use libc::{c_int, sockaddr, socklen_t};
use once_cell::sync::Lazy;
use std::ffi::CString;

pub(crate) type BindFn = unsafe extern "C" fn(c_int, *const sockaddr, socklen_t) -> c_int;
pub(crate) type ConnectFn = unsafe extern "C" fn(c_int, *const sockaddr, socklen_t) -> c_int;

unsafe fn lookup<T>(symbol: &'static str) -> Option<T> {
    let name = CString::new(symbol).ok()?;
    let handle = libc::dlsym(libc::RTLD_NEXT, name.as_ptr());
    if handle.is_null() {
        None
    } else {
        Some(std::mem::transmute_copy(&handle))
    }
}

pub(crate) static REAL_BIND: Lazy<Option<BindFn>> = Lazy::new(|| {
    let found = unsafe { lookup::<BindFn>("bind") };
    if found.is_none() {
        eprintln!("[bindhook] {}", ShimError::SymbolNotFound("bind"));
    }
    found
});

pub(crate) static REAL_CONNECT: Lazy<Option<ConnectFn>> = Lazy::new(|| {
    let found = unsafe { lookup::<ConnectFn>("connect") };
    if found.is_none() {
        eprintln!("[bindhook] {}", ShimError::SymbolNotFound("connect"));
    }
    found
});

/// Capture both delegates. Called from the load-time constructor so the
/// lookups happen before application code can reach the hooks.
pub(crate) fn initialize() {
    Lazy::force(&REAL_BIND);
    Lazy::force(&REAL_CONNECT);
}
