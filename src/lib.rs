//! posixcap: a process-wide POSIX capability
//!
//! One binding per process, built on first use, that issues permission and
//! ownership system calls and reports failures as typed errors.
//!
//! # Architecture
//!
//! ## Capability ([`capability`])
//! - [`capability::acquire`]: lazily built, process-wide handle
//!
//! ## Kernel Primitives ([`kernel`])
//! - [`kernel::posix`]: the operation surface (`chmod`, `stat`, ...)
//! - [`kernel::native`]: native binding for unix families
//! - [`kernel::unsupported`]: stand-in binding, every operation not implemented
//! - [`kernel::backend`]: platform detection and binding selection
//! - [`kernel::handler`]: error-reporting and verbosity hooks
//! - [`kernel::errno`]: platform error codes
//!
//! ## Configuration ([`config`])
//! - [`config::settings`]: `POSIXCAP_VERBOSE` and `POSIXCAP_NATIVE`
//! - [`config::types`]: errors, stat results, platform families
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let posix = posixcap::acquire();
//! posix.chmod(Path::new("/tmp/file"), 0o2755)?;
//! assert_eq!(posix.stat(Path::new("/tmp/file"))?.permission_bits(), 0o2755);
//! # Ok::<(), posixcap::PosixError>(())
//! ```

// Process-wide accessor
pub mod capability;

// Kernel Primitives
pub mod kernel;

// Configuration
pub mod config;

// CLI entrypoint wiring for the posixcap binary.
pub mod cli;

pub use capability::{acquire, CapabilityHandle};
pub use config::types::*;
pub use kernel::handler::{PosixHandler, ProcessHandler};
pub use kernel::posix::Posix;
