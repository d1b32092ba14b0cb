//! Platform error codes.

/// Raw errno value reported by a failed system call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeErrno(i32);

impl NativeErrno {
    pub fn from_raw(code: i32) -> Self {
        Self(code)
    }

    pub fn raw(self) -> i32 {
        self.0
    }

    /// Human readable description, e.g. "No such file or directory"
    #[cfg(unix)]
    pub fn description(self) -> String {
        nix::errno::Errno::from_raw(self.0).desc().to_string()
    }

    #[cfg(not(unix))]
    pub fn description(self) -> String {
        std::io::Error::from_raw_os_error(self.0).to_string()
    }
}

#[cfg(unix)]
impl From<nix::errno::Errno> for NativeErrno {
    fn from(err: nix::errno::Errno) -> Self {
        Self(err as i32)
    }
}

impl std::fmt::Display for NativeErrno {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (errno {})", self.description(), self.0)
    }
}
