use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::{
    ownership::{Ownership, OwnershipBackend, SymlinkOwnerPolicy, SyscallOwnershipBackend},
    report::{ChownReport, WalkStep},
};

/// A [TreeOwnerChanger] recursively changes the owning user and group of every entry within a
/// filesystem tree to a fixed [Ownership], on a best-effort basis.
///
/// The walk is depth-first, blocking and driven by an explicit stack, so its depth is bounded by memory
/// rather than by the calling thread's stack. Symbolic links are never descended into. Every
/// directory's children are visited before the directory itself (post-order), and every failure
/// is recovered from locally: an entry that can't be changed is skipped and the walk continues.
///
/// The user-setting step of a symbolic link is controlled by [SymlinkOwnerPolicy], while the
/// group-setting step never follows links.
#[derive(Debug, Clone)]
pub struct TreeOwnerChanger<B: OwnershipBackend = SyscallOwnershipBackend> {
    ownership: Ownership,
    symlink_owner_policy: SymlinkOwnerPolicy,
    backend: B,
}

impl TreeOwnerChanger {
    /// Create a [TreeOwnerChanger] that issues syscalls directly via [SyscallOwnershipBackend].
    pub fn new(ownership: Ownership) -> Self {
        Self::with_backend(ownership, SyscallOwnershipBackend)
    }
}

impl<B: OwnershipBackend> TreeOwnerChanger<B> {
    pub fn with_backend(ownership: Ownership, backend: B) -> Self {
        Self {
            ownership,
            symlink_owner_policy: SymlinkOwnerPolicy::default(),
            backend,
        }
    }

    pub fn symlink_owner_policy(mut self, policy: SymlinkOwnerPolicy) -> Self {
        self.symlink_owner_policy = policy;
        self
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Walk the tree rooted at the given [Path], attempting to change the ownership of every entry
    /// including the root itself. Failures are silently discarded; a non-existent root results in
    /// no changes.
    pub fn apply(&self, root: &Path) {
        let mut report = ChownReport::default();
        self.walk(root, &mut report);
    }

    /// Perform the same walk as [TreeOwnerChanger::apply], but collect every recovered failure into
    /// a [ChownReport] instead of discarding it.
    pub fn apply_with_report(&self, root: &Path) -> ChownReport {
        let mut report = ChownReport::default();
        self.walk(root, &mut report);
        report
    }

    /// Attempt to set the owning user and then the owning group of a single entry, without
    /// descending into it. Both steps are attempted independently and their failures are discarded.
    pub fn set_ownership(&self, entry: &Path) {
        let mut report = ChownReport::default();
        self.set_ownership_reporting(entry, &mut report);
    }

    fn walk(&self, root: &Path, report: &mut ChownReport) {
        let mut frames = vec![WalkFrame::Enter(root.to_owned())];

        while let Some(frame) = frames.pop() {
            let path = match frame {
                WalkFrame::Finish(path) => {
                    self.set_ownership_reporting(&path, report);
                    continue;
                }
                WalkFrame::Enter(path) => path,
            };

            let metadata = match std::fs::symlink_metadata(&path) {
                Ok(metadata) => metadata,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "Skipping entry whose metadata can't be read");
                    report.record(&path, WalkStep::Inspect, err);
                    continue;
                }
            };

            if !metadata.is_dir() {
                self.set_ownership_reporting(&path, report);
                continue;
            }

            // the listing is read and closed before any child is entered
            let children = list_children(&path, report);
            frames.push(WalkFrame::Finish(path));
            frames.extend(children.into_iter().rev().map(WalkFrame::Enter));
        }
    }

    fn set_ownership_reporting(&self, path: &Path, report: &mut ChownReport) {
        trace!(path = %path.display(), uid = self.ownership.uid, gid = self.ownership.gid, "Setting ownership");
        report.visited += 1;

        let follow_symlinks = self.symlink_owner_policy == SymlinkOwnerPolicy::Follow;
        if let Err(err) = self
            .backend
            .set_owner(path, Some(self.ownership.uid), None, follow_symlinks)
        {
            debug!(path = %path.display(), error = %err, "Setting the owning user failed");
            report.record(path, WalkStep::SetUser, err);
        }

        if let Err(err) = self.backend.set_owner(path, None, Some(self.ownership.gid), false) {
            debug!(path = %path.display(), error = %err, "Setting the owning group failed");
            report.record(path, WalkStep::SetGroup, err);
        }
    }
}

/// A pending step of the post-order walk. A directory's [WalkFrame::Finish] sits below the frames of all
/// its children on the stack.
enum WalkFrame {
    Enter(PathBuf),
    Finish(PathBuf),
}

fn list_children(path: &Path, report: &mut ChownReport) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "Listing a directory failed");
            report.record(path, WalkStep::ListDirectory, err);
            return Vec::new();
        }
    };

    let mut children = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => children.push(entry.path()),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Reading a directory entry failed");
                report.record(path, WalkStep::ListDirectory, err);
            }
        }
    }

    children
}
