//! Platform detection and binding selection.

use crate::config::types::PlatformFamily;
use crate::kernel::handler::PosixHandler;
use crate::kernel::posix::Posix;
use crate::kernel::unsupported::UnsupportedPosix;
use std::sync::Arc;

/// Detect the platform family of the compile target.
pub fn detect_platform() -> PlatformFamily {
    if cfg!(target_os = "linux") || cfg!(target_os = "android") {
        PlatformFamily::Linux
    } else if cfg!(target_vendor = "apple") {
        PlatformFamily::Darwin
    } else if cfg!(any(
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    )) {
        PlatformFamily::Bsd
    } else if cfg!(any(target_os = "solaris", target_os = "illumos")) {
        PlatformFamily::Solaris
    } else if cfg!(unix) {
        PlatformFamily::OtherUnix
    } else {
        PlatformFamily::Unsupported
    }
}

/// Create a binding for `platform`: native where available and enabled,
/// the stand-in otherwise. Never fails.
pub fn create_posix(
    native: bool,
    platform: PlatformFamily,
    handler: Arc<dyn PosixHandler>,
) -> Box<dyn Posix> {
    log::debug!(
        "POSIX binding selection: native={}, platform={}",
        native,
        platform
    );

    #[cfg(unix)]
    {
        if native && platform != PlatformFamily::Unsupported {
            log::debug!("Using native POSIX binding for {}", platform);
            return Box::new(crate::kernel::native::NativePosix::new(platform, handler));
        }
    }

    if native {
        handler.warn(&format!(
            "No native POSIX binding for {}, using stand-in",
            platform
        ));
    } else {
        log::debug!("Native POSIX binding disabled, using stand-in");
    }
    Box::new(UnsupportedPosix::new(platform, handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::handler::ProcessHandler;

    fn handler() -> Arc<dyn PosixHandler> {
        Arc::new(ProcessHandler::new(|| false))
    }

    #[test]
    fn detects_a_family() {
        let platform = detect_platform();
        if cfg!(unix) {
            assert_ne!(platform, PlatformFamily::Unsupported);
        } else {
            assert_eq!(platform, PlatformFamily::Unsupported);
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn detects_linux() {
        assert_eq!(detect_platform(), PlatformFamily::Linux);
    }

    #[test]
    fn native_disabled_selects_stand_in() {
        let posix = create_posix(false, detect_platform(), handler());
        assert!(!posix.is_native());
        assert_eq!(posix.platform(), detect_platform());
    }

    #[test]
    fn unsupported_family_selects_stand_in() {
        let posix = create_posix(true, PlatformFamily::Unsupported, handler());
        assert!(!posix.is_native());
    }

    #[cfg(unix)]
    #[test]
    fn unix_selects_native_binding() {
        let posix = create_posix(true, detect_platform(), handler());
        assert!(posix.is_native());
    }
}
