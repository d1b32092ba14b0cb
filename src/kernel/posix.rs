//! The POSIX operation surface.
//!
//! Every operation has a default body that reports it as unimplemented, so a
//! binding only overrides what its platform supports and new operations can
//! be added without touching the stand-in binding.

use crate::config::types::{FileStat, PlatformFamily, Result};
use crate::kernel::handler::PosixHandler;
use std::path::{Path, PathBuf};

pub trait Posix: Send + Sync {
    fn platform(&self) -> PlatformFamily;
    fn handler(&self) -> &dyn PosixHandler;
    /// False for the stand-in binding
    fn is_native(&self) -> bool;

    /// Set all twelve permission bits of `path`, following symlinks
    fn chmod(&self, _path: &Path, _mode: u32) -> Result<()> {
        Err(self.unimplemented("chmod"))
    }

    /// Like `chmod`, but changes a symlink itself
    fn lchmod(&self, _path: &Path, _mode: u32) -> Result<()> {
        Err(self.unimplemented("lchmod"))
    }

    /// `None` leaves the corresponding id unchanged
    fn chown(&self, _path: &Path, _uid: Option<u32>, _gid: Option<u32>) -> Result<()> {
        Err(self.unimplemented("chown"))
    }

    fn lchown(&self, _path: &Path, _uid: Option<u32>, _gid: Option<u32>) -> Result<()> {
        Err(self.unimplemented("lchown"))
    }

    fn stat(&self, _path: &Path) -> Result<FileStat> {
        Err(self.unimplemented("stat"))
    }

    fn lstat(&self, _path: &Path) -> Result<FileStat> {
        Err(self.unimplemented("lstat"))
    }

    /// Install `mask` and return the previous one
    fn umask(&self, _mask: u32) -> Result<u32> {
        Err(self.unimplemented("umask"))
    }

    fn mkdir(&self, _path: &Path, _mode: u32) -> Result<()> {
        Err(self.unimplemented("mkdir"))
    }

    fn readlink(&self, _path: &Path) -> Result<PathBuf> {
        Err(self.unimplemented("readlink"))
    }

    fn symlink(&self, _target: &Path, _link: &Path) -> Result<()> {
        Err(self.unimplemented("symlink"))
    }

    fn link(&self, _existing: &Path, _new: &Path) -> Result<()> {
        Err(self.unimplemented("link"))
    }

    fn getuid(&self) -> Result<u32> {
        Err(self.unimplemented("getuid"))
    }

    fn geteuid(&self) -> Result<u32> {
        Err(self.unimplemented("geteuid"))
    }

    fn getgid(&self) -> Result<u32> {
        Err(self.unimplemented("getgid"))
    }

    fn getegid(&self) -> Result<u32> {
        Err(self.unimplemented("getegid"))
    }

    fn getpid(&self) -> Result<u32> {
        Err(self.unimplemented("getpid"))
    }

    #[doc(hidden)]
    fn unimplemented(&self, method: &str) -> crate::config::types::PosixError {
        self.handler().unimplemented(method, self.platform().name())
    }
}

impl std::fmt::Debug for dyn Posix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Posix")
            .field("platform", &self.platform())
            .field("native", &self.is_native())
            .finish()
    }
}
