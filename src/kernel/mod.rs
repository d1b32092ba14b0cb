//! Thin wrappers around the host's POSIX system calls.
//!
//! All `unsafe` code is concentrated in `native` with explicit SAFETY comments.
//! Dependency direction: errno -> handler -> posix -> native/unsupported -> backend

pub mod backend;
pub mod errno;
pub mod handler;
#[cfg(unix)]
pub mod native;
pub mod posix;
pub mod unsupported;
