/// Core types shared by every binding
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across posixcap
pub type Result<T> = std::result::Result<T, PosixError>;

/// File type mask (`S_IFMT`)
pub const S_IFMT: u32 = 0o170_000;
/// Directory file type
pub const S_IFDIR: u32 = 0o040_000;
/// Regular file type
pub const S_IFREG: u32 = 0o100_000;
/// Symbolic link file type
pub const S_IFLNK: u32 = 0o120_000;
/// Set-user-ID bit
pub const S_ISUID: u32 = 0o4000;
/// Set-group-ID bit
pub const S_ISGID: u32 = 0o2000;
/// Sticky bit
pub const S_ISVTX: u32 = 0o1000;
/// rwx for owner, group and other plus the three special bits
pub const PERMISSION_MASK: u32 = 0o7777;

/// Errors raised by POSIX bindings.
///
/// `Native` and `NativeCall` carry the raw errno reported by the platform;
/// `NotImplemented` is raised when the selected binding has no such
/// operation and never carries an errno.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PosixError {
    #[error("{operation} is not implemented on {platform}")]
    NotImplemented {
        operation: String,
        platform: &'static str,
    },

    #[error("native error {description}{}", extra_suffix(.extra))]
    Native {
        errno: i32,
        description: String,
        extra: Option<String>,
    },

    #[error("native error calling {method}: {description}{}", extra_suffix(.extra))]
    NativeCall {
        errno: i32,
        method: String,
        description: String,
        extra: Option<String>,
    },
}

fn extra_suffix(extra: &Option<String>) -> String {
    match extra {
        Some(extra) => format!(" {}", extra),
        None => String::new(),
    }
}

impl PosixError {
    /// True when the binding has no implementation for the operation
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, PosixError::NotImplemented { .. })
    }

    /// Raw platform error code, if this error came from a failed native call
    pub fn errno(&self) -> Option<i32> {
        match self {
            PosixError::Native { errno, .. } | PosixError::NativeCall { errno, .. } => {
                Some(*errno)
            }
            PosixError::NotImplemented { .. } => None,
        }
    }

    /// Name of the failing operation, when known
    pub fn method(&self) -> Option<&str> {
        match self {
            PosixError::NativeCall { method, .. } => Some(method),
            PosixError::NotImplemented { operation, .. } => Some(operation),
            PosixError::Native { .. } => None,
        }
    }
}

/// Operating system family a binding was selected for
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlatformFamily {
    Linux,
    Darwin,
    Bsd,
    Solaris,
    OtherUnix,
    Unsupported,
}

impl PlatformFamily {
    pub fn name(self) -> &'static str {
        match self {
            PlatformFamily::Linux => "linux",
            PlatformFamily::Darwin => "darwin",
            PlatformFamily::Bsd => "bsd",
            PlatformFamily::Solaris => "solaris",
            PlatformFamily::OtherUnix => "unix",
            PlatformFamily::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Subset of `struct stat` reported by `stat`/`lstat`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileStat {
    /// Full st_mode: file type plus permission and special bits
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: i64,
    pub nlink: u64,
    pub ino: u64,
    pub dev: u64,
    /// Modification time, seconds since the epoch
    pub mtime: i64,
}

impl FileStat {
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Permission bits including setuid, setgid and sticky (`mode & 07777`)
    pub fn permission_bits(&self) -> u32 {
        self.mode & PERMISSION_MASK
    }

    pub fn is_setuid(&self) -> bool {
        self.mode & S_ISUID != 0
    }

    pub fn is_setgid(&self) -> bool {
        self.mode & S_ISGID != 0
    }

    pub fn is_sticky(&self) -> bool {
        self.mode & S_ISVTX != 0
    }

    pub fn is_directory(&self) -> bool {
        self.mode & S_IFMT == S_IFDIR
    }

    pub fn is_file(&self) -> bool {
        self.mode & S_IFMT == S_IFREG
    }

    pub fn is_symlink(&self) -> bool {
        self.mode & S_IFMT == S_IFLNK
    }
}
