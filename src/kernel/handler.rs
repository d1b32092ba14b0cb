//! Error-reporting and tracing hooks handed to every binding.
//!
//! A binding never decides how a failure is presented. It reports the errno
//! to its handler and returns whatever error the handler builds.

use crate::config::settings;
use crate::config::types::PosixError;
use crate::kernel::errno::NativeErrno;
use std::sync::Arc;

/// Hooks a binding calls when a native call fails or needs tracing.
pub trait PosixHandler: Send + Sync {
    /// Failure not attributable to a specific call
    fn error(&self, errno: NativeErrno, extra: Option<&str>) -> PosixError {
        PosixError::Native {
            errno: errno.raw(),
            description: errno.description(),
            extra: extra.map(str::to_string),
        }
    }

    /// Failure of the named operation
    fn error_calling(&self, errno: NativeErrno, method: &str, extra: Option<&str>) -> PosixError {
        PosixError::NativeCall {
            errno: errno.raw(),
            method: method.to_string(),
            description: errno.description(),
            extra: extra.map(str::to_string),
        }
    }

    /// Operation missing from the binding for `platform`
    fn unimplemented(&self, method: &str, platform: &'static str) -> PosixError {
        PosixError::NotImplemented {
            operation: method.to_string(),
            platform,
        }
    }

    /// Non-fatal binding diagnostics
    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }

    /// Consulted before every native call
    fn is_verbose(&self) -> bool;
}

type VerboseQuery = Arc<dyn Fn() -> bool + Send + Sync>;

/// Default handler: errors as built by [`PosixHandler`], verbosity from an
/// injected query.
#[derive(Clone)]
pub struct ProcessHandler {
    verbose: VerboseQuery,
}

impl ProcessHandler {
    pub fn new<F>(verbose: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            verbose: Arc::new(verbose),
        }
    }
}

impl Default for ProcessHandler {
    /// Reads the process-wide verbosity flag on every query
    fn default() -> Self {
        Self::new(settings::is_verbose)
    }
}

impl std::fmt::Debug for ProcessHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessHandler").finish_non_exhaustive()
    }
}

impl PosixHandler for ProcessHandler {
    fn is_verbose(&self) -> bool {
        (self.verbose)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn targeted_error_names_method() {
        let handler = ProcessHandler::new(|| false);
        let err = handler.error_calling(NativeErrno::from_raw(2), "stat", Some("/nope"));
        assert_eq!(err.method(), Some("stat"));
        assert_eq!(err.errno(), Some(2));
        let message = err.to_string();
        assert!(message.starts_with("native error calling stat: "));
        assert!(message.ends_with(" /nope"));
    }

    #[test]
    fn untargeted_error_has_plain_prefix() {
        let handler = ProcessHandler::new(|| false);
        let err = handler.error(NativeErrno::from_raw(13), Some("ctx"));
        let message = err.to_string();
        assert!(message.starts_with("native error "));
        assert!(!message.starts_with("native error calling"));
        assert!(message.ends_with(" ctx"));
    }

    #[test]
    fn unimplemented_is_not_a_native_error() {
        let handler = ProcessHandler::new(|| false);
        let err = handler.unimplemented("lchmod", "linux");
        assert!(err.is_not_implemented());
        assert_eq!(err.errno(), None);
    }

    #[test]
    fn verbosity_is_queried_live() {
        let flag = Arc::new(AtomicBool::new(false));
        let query = Arc::clone(&flag);
        let handler = ProcessHandler::new(move || query.load(Ordering::Relaxed));

        assert!(!handler.is_verbose());
        flag.store(true, Ordering::Relaxed);
        assert!(handler.is_verbose());
    }
}
