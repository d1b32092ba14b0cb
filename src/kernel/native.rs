//! Native binding for unix families.
//!
//! Every call asks the handler whether to trace, issues the syscall, and
//! hands any errno to the handler's targeted error hook together with the
//! path(s) involved.

use crate::config::types::{FileStat, PlatformFamily, Result};
use crate::kernel::errno::NativeErrno;
use crate::kernel::handler::PosixHandler;
use crate::kernel::posix::Posix;
use nix::errno::Errno;
use nix::sys::stat::Mode;
use nix::unistd::{Gid, Uid};
use nix::NixPath;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct NativePosix {
    platform: PlatformFamily,
    handler: Arc<dyn PosixHandler>,
}

impl NativePosix {
    pub fn new(platform: PlatformFamily, handler: Arc<dyn PosixHandler>) -> Self {
        Self { platform, handler }
    }

    fn trace(&self, call: std::fmt::Arguments<'_>) {
        if self.handler.is_verbose() {
            log::info!("posix[{}]: {}", self.platform, call);
        }
    }

    /// Turn a nix result into ours, attributing failures to `method`.
    fn check<T>(&self, method: &str, extra: &str, result: nix::Result<T>) -> Result<T> {
        result.map_err(|errno| {
            self.handler
                .error_calling(NativeErrno::from(errno), method, Some(extra))
        })
    }

    /// Run a libc call taking one path; -1 becomes the thread's errno.
    fn path_call<F>(&self, method: &str, path: &Path, call: F) -> Result<()>
    where
        F: FnOnce(*const libc::c_char) -> libc::c_int,
    {
        let result = path
            .with_nix_path(|cstr| call(cstr.as_ptr()))
            .and_then(Errno::result);
        self.check(method, &path.display().to_string(), result)
            .map(drop)
    }

    /// Permission bits as a `Mode`; anything outside 07777 is EINVAL.
    fn mode_bits(&self, method: &str, extra: &str, mode: u32) -> Result<Mode> {
        let bits = libc::mode_t::try_from(mode)
            .ok()
            .and_then(Mode::from_bits)
            .ok_or(Errno::EINVAL);
        self.check(method, extra, bits)
    }

    /// Same as [`Self::path_call`] for calls taking two paths.
    fn two_path_call<F>(&self, method: &str, first: &Path, second: &Path, call: F) -> Result<()>
    where
        F: FnOnce(*const libc::c_char, *const libc::c_char) -> libc::c_int,
    {
        let result = first
            .with_nix_path(|a| second.with_nix_path(|b| call(a.as_ptr(), b.as_ptr())))
            .and_then(|inner| inner)
            .and_then(Errno::result);
        let extra = format!("{} -> {}", first.display(), second.display());
        self.check(method, &extra, result).map(drop)
    }
}

#[allow(clippy::unnecessary_cast)]
fn to_file_stat(raw: nix::sys::stat::FileStat) -> FileStat {
    FileStat {
        mode: raw.st_mode as u32,
        uid: raw.st_uid as u32,
        gid: raw.st_gid as u32,
        size: raw.st_size as i64,
        nlink: raw.st_nlink as u64,
        ino: raw.st_ino as u64,
        dev: raw.st_dev as u64,
        mtime: raw.st_mtime as i64,
    }
}

fn id_or_unchanged(id: Option<u32>) -> u32 {
    // (uid_t)-1 tells chown(2) to leave the id alone
    id.unwrap_or(u32::MAX)
}

impl Posix for NativePosix {
    fn platform(&self) -> PlatformFamily {
        self.platform
    }

    fn handler(&self) -> &dyn PosixHandler {
        self.handler.as_ref()
    }

    fn is_native(&self) -> bool {
        true
    }

    fn chmod(&self, path: &Path, mode: u32) -> Result<()> {
        self.trace(format_args!("chmod({}, {:o})", path.display(), mode));
        // SAFETY: ptr is a NUL-terminated path owned by with_nix_path for the call's duration.
        self.path_call("chmod", path, |ptr| unsafe {
            libc::chmod(ptr, mode as libc::mode_t)
        })
    }

    #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
    fn lchmod(&self, path: &Path, mode: u32) -> Result<()> {
        self.trace(format_args!("lchmod({}, {:o})", path.display(), mode));
        // SAFETY: see chmod.
        self.path_call("lchmod", path, |ptr| unsafe {
            libc::lchmod(ptr, mode as libc::mode_t)
        })
    }

    fn chown(&self, path: &Path, uid: Option<u32>, gid: Option<u32>) -> Result<()> {
        self.trace(format_args!("chown({}, {:?}, {:?})", path.display(), uid, gid));
        let result = nix::unistd::chown(path, uid.map(Uid::from_raw), gid.map(Gid::from_raw));
        self.check("chown", &path.display().to_string(), result)
    }

    fn lchown(&self, path: &Path, uid: Option<u32>, gid: Option<u32>) -> Result<()> {
        self.trace(format_args!("lchown({}, {:?}, {:?})", path.display(), uid, gid));
        let (uid, gid) = (id_or_unchanged(uid), id_or_unchanged(gid));
        // SAFETY: see chmod.
        self.path_call("lchown", path, |ptr| unsafe {
            libc::lchown(ptr, uid as libc::uid_t, gid as libc::gid_t)
        })
    }

    fn stat(&self, path: &Path) -> Result<FileStat> {
        self.trace(format_args!("stat({})", path.display()));
        let result = nix::sys::stat::stat(path);
        self.check("stat", &path.display().to_string(), result)
            .map(to_file_stat)
    }

    fn lstat(&self, path: &Path) -> Result<FileStat> {
        self.trace(format_args!("lstat({})", path.display()));
        let result = nix::sys::stat::lstat(path);
        self.check("lstat", &path.display().to_string(), result)
            .map(to_file_stat)
    }

    #[allow(clippy::unnecessary_cast)]
    fn umask(&self, mask: u32) -> Result<u32> {
        self.trace(format_args!("umask({:o})", mask));
        let mask = self.mode_bits("umask", &format!("{:o}", mask), mask)?;
        let previous = nix::sys::stat::umask(mask);
        Ok(previous.bits() as u32)
    }

    fn mkdir(&self, path: &Path, mode: u32) -> Result<()> {
        self.trace(format_args!("mkdir({}, {:o})", path.display(), mode));
        let extra = path.display().to_string();
        let mode = self.mode_bits("mkdir", &extra, mode)?;
        let result = nix::unistd::mkdir(path, mode);
        self.check("mkdir", &extra, result)
    }

    fn readlink(&self, path: &Path) -> Result<PathBuf> {
        self.trace(format_args!("readlink({})", path.display()));
        let result = nix::fcntl::readlink(path);
        self.check("readlink", &path.display().to_string(), result)
            .map(PathBuf::from)
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        self.trace(format_args!("symlink({}, {})", target.display(), link.display()));
        // SAFETY: both pointers are NUL-terminated and live for the call.
        self.two_path_call("symlink", target, link, |a, b| unsafe {
            libc::symlink(a, b)
        })
    }

    fn link(&self, existing: &Path, new: &Path) -> Result<()> {
        self.trace(format_args!("link({}, {})", existing.display(), new.display()));
        // SAFETY: both pointers are NUL-terminated and live for the call.
        self.two_path_call("link", existing, new, |a, b| unsafe { libc::link(a, b) })
    }

    fn getuid(&self) -> Result<u32> {
        self.trace(format_args!("getuid()"));
        Ok(nix::unistd::getuid().as_raw())
    }

    fn geteuid(&self) -> Result<u32> {
        self.trace(format_args!("geteuid()"));
        Ok(nix::unistd::geteuid().as_raw())
    }

    fn getgid(&self) -> Result<u32> {
        self.trace(format_args!("getgid()"));
        Ok(nix::unistd::getgid().as_raw())
    }

    fn getegid(&self) -> Result<u32> {
        self.trace(format_args!("getegid()"));
        Ok(nix::unistd::getegid().as_raw())
    }

    fn getpid(&self) -> Result<u32> {
        self.trace(format_args!("getpid()"));
        Ok(nix::unistd::getpid().as_raw() as u32)
    }
}
