//! Thin wrappers over the ownership-related syscalls, backed by either `nix` or `rustix`
//! depending on the enabled syscall backend feature. All wrappers convert OS errors into
//! [std::io::Error] while preserving the raw errno.

#[cfg(not(any(feature = "nix-syscall-backend", feature = "rustix-syscall-backend")))]
compile_error!("chownr requires either the \"nix-syscall-backend\" or the \"rustix-syscall-backend\" feature");

#[cfg(all(feature = "nix-syscall-backend", not(feature = "rustix-syscall-backend")))]
mod imp_nix {
    use std::path::Path;

    use nix::{
        fcntl::AtFlags,
        unistd::{Gid, Uid},
    };

    #[inline]
    pub fn chown(path: &Path, uid: Option<u32>, gid: Option<u32>) -> Result<(), std::io::Error> {
        nix_op(nix::unistd::chown(path, uid.map(Uid::from_raw), gid.map(Gid::from_raw)))
    }

    #[inline]
    pub fn lchown(path: &Path, uid: Option<u32>, gid: Option<u32>) -> Result<(), std::io::Error> {
        // a None dirfd resolves relative paths against the current working directory, same as AT_FDCWD
        nix_op(nix::unistd::fchownat(
            None,
            path,
            uid.map(Uid::from_raw),
            gid.map(Gid::from_raw),
            AtFlags::AT_SYMLINK_NOFOLLOW,
        ))
    }

    #[inline]
    pub fn geteuid() -> u32 {
        nix::unistd::geteuid().as_raw()
    }

    #[inline]
    pub fn getegid() -> u32 {
        nix::unistd::getegid().as_raw()
    }

    #[inline(always)]
    fn nix_op<T>(result: Result<T, nix::Error>) -> Result<T, std::io::Error> {
        result.map_err(|errno| std::io::Error::from_raw_os_error(errno as i32))
    }
}

#[cfg(feature = "rustix-syscall-backend")]
mod imp_rustix {
    use std::path::Path;

    use rustix::fs::{AtFlags, CWD, Gid, Uid};

    #[inline]
    #[allow(unused_unsafe)]
    fn ids(uid: Option<u32>, gid: Option<u32>) -> (Option<Uid>, Option<Gid>) {
        (
            uid.map(|uid| unsafe { Uid::from_raw(uid) }),
            gid.map(|gid| unsafe { Gid::from_raw(gid) }),
        )
    }

    #[inline]
    pub fn chown(path: &Path, uid: Option<u32>, gid: Option<u32>) -> Result<(), std::io::Error> {
        let (uid, gid) = ids(uid, gid);
        rustix_op(rustix::fs::chown(path, uid, gid))
    }

    #[inline]
    pub fn lchown(path: &Path, uid: Option<u32>, gid: Option<u32>) -> Result<(), std::io::Error> {
        let (uid, gid) = ids(uid, gid);
        rustix_op(rustix::fs::chownat(CWD, path, uid, gid, AtFlags::SYMLINK_NOFOLLOW))
    }

    #[inline]
    pub fn geteuid() -> u32 {
        rustix::process::geteuid().as_raw()
    }

    #[inline]
    pub fn getegid() -> u32 {
        rustix::process::getegid().as_raw()
    }

    #[inline(always)]
    fn rustix_op<T>(result: Result<T, rustix::io::Errno>) -> Result<T, std::io::Error> {
        result.map_err(|errno| std::io::Error::from_raw_os_error(errno.raw_os_error()))
    }
}

#[cfg(feature = "rustix-syscall-backend")]
pub use imp_rustix::*;

#[cfg(all(feature = "nix-syscall-backend", not(feature = "rustix-syscall-backend")))]
pub use imp_nix::*;
