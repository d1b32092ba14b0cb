//! Process-wide settings.
//!
//! Both keys are read from the environment. The verbosity flag is read once,
//! on first use, and can then be flipped at any time with [`set_verbose`];
//! bindings query it on every call through their handler, never caching it.

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, Ordering};

/// Enables tracing of every native call
pub const VERBOSE_KEY: &str = "POSIXCAP_VERBOSE";

/// Set to a false value to force the stand-in binding
pub const NATIVE_KEY: &str = "POSIXCAP_NATIVE";

static VERBOSE: Lazy<AtomicBool> = Lazy::new(|| AtomicBool::new(env_flag(VERBOSE_KEY, false)));

/// Current value of the verbosity flag
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Flip the verbosity flag for all later calls
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
    log::debug!("posix verbosity set to {}", verbose);
}

/// Whether `acquire` may select a native binding
pub fn native_enabled() -> bool {
    env_flag(NATIVE_KEY, true)
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => parse_flag(&value).unwrap_or_else(|| {
            log::warn!("Ignoring unrecognised value {:?} for {}", value, key);
            default
        }),
        Err(_) => default,
    }
}

/// Parse a boolean setting. Returns `None` for unrecognised input.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
