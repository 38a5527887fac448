use std::{path::Path, sync::LazyLock};

use crate::syscall;

pub(crate) static PROCESS_UID: LazyLock<u32> = LazyLock::new(|| syscall::geteuid());
pub(crate) static PROCESS_GID: LazyLock<u32> = LazyLock::new(|| syscall::getegid());

/// The target user and group that a tree's entries should be owned by. Both IDs are opaque
/// to chownr and are resolved by the host OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ownership {
    /// The UID of the target user.
    pub uid: u32,
    /// The GID of the target group.
    pub gid: u32,
}

impl Ownership {
    pub fn new(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }

    /// The effective UID and GID of the current process. Changing ownership to these never
    /// requires privileges on entries the process already owns.
    pub fn of_current_process() -> Self {
        Self {
            uid: *PROCESS_UID,
            gid: *PROCESS_GID,
        }
    }
}

/// How the user-setting step treats an entry that is a symbolic link. The group-setting step
/// never follows symbolic links, regardless of this policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SymlinkOwnerPolicy {
    /// The user is set on the link's target, while the group is set on the link itself.
    #[default]
    Follow,
    /// Both the user and the group are set on the link itself.
    NoFollow,
}

/// An [OwnershipBackend] performs the actual ownership mutation of a single filesystem entry.
/// A [None] ID leaves the respective part of the ownership untouched.
pub trait OwnershipBackend {
    fn set_owner(
        &self,
        path: &Path,
        uid: Option<u32>,
        gid: Option<u32>,
        follow_symlinks: bool,
    ) -> Result<(), std::io::Error>;
}

/// An [OwnershipBackend] that issues chown syscalls via the enabled syscall backend: "chown"
/// when following symbolic links and "fchownat" with AT_SYMLINK_NOFOLLOW otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyscallOwnershipBackend;

impl OwnershipBackend for SyscallOwnershipBackend {
    fn set_owner(
        &self,
        path: &Path,
        uid: Option<u32>,
        gid: Option<u32>,
        follow_symlinks: bool,
    ) -> Result<(), std::io::Error> {
        if follow_symlinks {
            syscall::chown(path, uid, gid)
        } else {
            syscall::lchown(path, uid, gid)
        }
    }
}
