use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chownr::ownership::OwnershipBackend;
use tempfile::TempDir;

#[allow(unused)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub path: PathBuf,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub follow_symlinks: bool,
}

/// An [OwnershipBackend] that only records the calls made to it, failing them for a configurable
/// set of paths.
#[allow(unused)]
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<RecordedCall>>,
    failing_paths: Vec<PathBuf>,
}

impl RecordingBackend {
    #[allow(unused)]
    pub fn failing_on(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing_paths: paths.into_iter().collect(),
        }
    }

    #[allow(unused)]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Every distinct path that was passed to the backend, in order of its first call.
    #[allow(unused)]
    pub fn visited_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for call in self.calls() {
            if !paths.contains(&call.path) {
                paths.push(call.path);
            }
        }
        paths
    }
}

impl OwnershipBackend for RecordingBackend {
    fn set_owner(
        &self,
        path: &Path,
        uid: Option<u32>,
        gid: Option<u32>,
        follow_symlinks: bool,
    ) -> Result<(), std::io::Error> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_owned(),
            uid,
            gid,
            follow_symlinks,
        });

        if self.failing_paths.iter().any(|failing_path| failing_path == path) {
            return Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        }

        Ok(())
    }
}

#[allow(unused)]
pub struct TestTree {
    pub dir: TempDir,
    /// Every entry of the tree, root included.
    pub entries: Vec<PathBuf>,
}

#[allow(unused)]
impl TestTree {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, path: &str) -> PathBuf {
        self.dir.path().join(path)
    }
}

/// Builds a tree of 3 files and 3 directories below the root:
/// a.txt, sub/, sub/b.txt, sub/deeper/, sub/deeper/c.txt, empty/
#[allow(unused)]
pub fn build_tree() -> TestTree {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_owned();

    std::fs::create_dir_all(root.join("sub/deeper")).unwrap();
    std::fs::create_dir(root.join("empty")).unwrap();
    std::fs::write(root.join("a.txt"), "a").unwrap();
    std::fs::write(root.join("sub/b.txt"), "b").unwrap();
    std::fs::write(root.join("sub/deeper/c.txt"), "c").unwrap();

    let entries = ["", "a.txt", "sub", "sub/b.txt", "sub/deeper", "sub/deeper/c.txt", "empty"]
        .into_iter()
        .map(|path| if path.is_empty() { root.clone() } else { root.join(path) })
        .collect();

    TestTree { dir, entries }
}

#[allow(unused)]
pub fn is_root() -> bool {
    chownr::syscall::geteuid() == 0
}

/// Builds a chain of nested "a" directories of the given depth below the root, returning the deepest one.
#[allow(unused)]
pub fn build_chain(root: &Path, depth: usize) -> PathBuf {
    let mut path = root.to_owned();
    for _ in 0..depth {
        path.push("a");
        std::fs::create_dir(&path).unwrap();
    }
    path
}
