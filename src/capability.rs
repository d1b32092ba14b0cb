//! Process-wide POSIX capability.
//!
//! The first call to [`acquire`] selects and builds the binding for the
//! current platform; every later call, from any thread, gets the same
//! handle. The binding is never rebuilt or torn down.

use crate::config::settings;
use crate::kernel::backend::{create_posix, detect_platform};
use crate::kernel::handler::ProcessHandler;
use crate::kernel::posix::Posix;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared handle to the process binding
pub type CapabilityHandle = Arc<dyn Posix>;

static POSIX: OnceLock<CapabilityHandle> = OnceLock::new();

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

/// Get the POSIX binding for this process.
///
/// Never fails: on platforms without POSIX support (or with
/// `POSIXCAP_NATIVE` switched off) the returned binding reports
/// [`PosixError::NotImplemented`](crate::PosixError::NotImplemented) from
/// each operation instead. Failed native calls come back as
/// [`PosixError::NativeCall`](crate::PosixError::NativeCall).
pub fn acquire() -> CapabilityHandle {
    POSIX.get_or_init(build).clone()
}

/// Whether [`acquire`] has already built the binding
pub fn is_initialized() -> bool {
    POSIX.get().is_some()
}

/// Number of times the process binding has been built (0 or 1)
pub fn construction_count() -> usize {
    CONSTRUCTIONS.load(Ordering::SeqCst)
}

fn build() -> CapabilityHandle {
    CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
    let platform = detect_platform();
    let posix: CapabilityHandle = Arc::from(create_posix(
        settings::native_enabled(),
        platform,
        Arc::new(ProcessHandler::default()),
    ));
    log::debug!(
        "POSIX capability initialized (platform={}, native={})",
        platform,
        posix.is_native()
    );
    posix
}
