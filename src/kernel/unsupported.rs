//! Stand-in binding for platforms without native POSIX support, or when the
//! native binding is switched off.
//!
//! Only `getpid` has a portable answer; everything else falls through to the
//! not-implemented defaults of [`Posix`].

use crate::config::types::{PlatformFamily, Result};
use crate::kernel::handler::PosixHandler;
use crate::kernel::posix::Posix;
use std::sync::Arc;

pub struct UnsupportedPosix {
    platform: PlatformFamily,
    handler: Arc<dyn PosixHandler>,
}

impl UnsupportedPosix {
    pub fn new(platform: PlatformFamily, handler: Arc<dyn PosixHandler>) -> Self {
        Self { platform, handler }
    }
}

impl Posix for UnsupportedPosix {
    fn platform(&self) -> PlatformFamily {
        self.platform
    }

    fn handler(&self) -> &dyn PosixHandler {
        self.handler.as_ref()
    }

    fn is_native(&self) -> bool {
        false
    }

    fn getpid(&self) -> Result<u32> {
        if self.handler.is_verbose() {
            log::info!("posix[{}]: getpid() via std", self.platform);
        }
        Ok(std::process::id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::handler::ProcessHandler;
    use std::path::Path;

    fn stand_in() -> UnsupportedPosix {
        UnsupportedPosix::new(
            PlatformFamily::Unsupported,
            Arc::new(ProcessHandler::new(|| false)),
        )
    }

    #[test]
    fn construction_never_fails_and_is_not_native() {
        let posix = stand_in();
        assert!(!posix.is_native());
        assert_eq!(posix.platform(), PlatformFamily::Unsupported);
    }

    #[test]
    fn file_operations_are_not_implemented() {
        let posix = stand_in();
        let path = Path::new("/tmp/anything");

        let errors = vec![
            posix.chmod(path, 0o2777).unwrap_err(),
            posix.lchmod(path, 0o777).unwrap_err(),
            posix.chown(path, Some(1), None).unwrap_err(),
            posix.stat(path).unwrap_err(),
            posix.lstat(path).unwrap_err(),
            posix.readlink(path).unwrap_err(),
            posix.umask(0o022).unwrap_err(),
        ];

        for err in errors {
            assert!(err.is_not_implemented(), "unexpected error: {}", err);
            assert_eq!(err.errno(), None);
            assert!(err.to_string().ends_with("is not implemented on unsupported"));
        }
    }

    #[test]
    fn error_names_the_operation() {
        let err = stand_in().stat(Path::new("/")).unwrap_err();
        assert_eq!(err.method(), Some("stat"));
    }

    #[test]
    fn getpid_is_best_effort() {
        assert_eq!(stand_in().getpid().unwrap(), std::process::id());
    }

    #[test]
    fn keeps_the_detected_family() {
        let posix = UnsupportedPosix::new(
            PlatformFamily::Linux,
            Arc::new(ProcessHandler::new(|| false)),
        );
        let err = posix.geteuid().unwrap_err();
        assert!(err.to_string().ends_with("is not implemented on linux"));
    }
}
