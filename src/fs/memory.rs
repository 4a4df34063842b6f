//! In-memory filesystem for testing.

use super::{parent_dir, Filesystem};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
struct Node {
    path: PathBuf,
    is_dir: bool,
}

/// In-memory [`Filesystem`] for unit tests.
///
/// With `case_insensitive` set, lookups ignore letter case and a rename whose
/// target only differs from the source in case is silently absorbed, which is
/// the behaviour the two-phase rename exists to work around. Individual
/// source paths can be made to fail on rename to simulate I/O errors.
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    nodes: RefCell<Vec<Node>>,
    case_insensitive: bool,
    failing: RefCell<Vec<PathBuf>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_insensitive() -> Self {
        Self {
            case_insensitive: true,
            ..Self::default()
        }
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.nodes.borrow_mut().push(Node {
            path: path.into(),
            is_dir: true,
        });
        self
    }

    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.nodes.borrow_mut().push(Node {
            path: path.into(),
            is_dir: false,
        });
        self
    }

    /// Make every rename away from `path` fail.
    pub fn fail_rename_from(&self, path: impl Into<PathBuf>) {
        self.failing.borrow_mut().push(path.into());
    }

    /// Paths currently present, exactly as stored.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.nodes.borrow().iter().map(|n| n.path.clone()).collect()
    }

    fn same(&self, a: &Path, b: &Path) -> bool {
        if self.case_insensitive {
            a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
        } else {
            a == b
        }
    }

    fn find(&self, path: &Path) -> Option<usize> {
        self.nodes.borrow().iter().position(|n| self.same(&n.path, path))
    }

    fn within(&self, path: &Path, root: &Path) -> bool {
        self.same(path, root)
            || path
                .ancestors()
                .skip(1)
                .any(|ancestor| self.same(ancestor, root))
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.find(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.find(path)
            .map(|i| self.nodes.borrow()[i].is_dir)
            .unwrap_or(false)
    }

    fn entry_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        Ok(self
            .nodes
            .borrow()
            .iter()
            .filter(|n| self.same(parent_dir(&n.path), dir))
            .filter_map(|n| n.path.file_name().map(|f| f.to_string_lossy().to_string()))
            .collect())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.failing.borrow().iter().any(|p| self.same(p, from)) {
            return Err(io::Error::new(io::ErrorKind::Other, "injected failure"));
        }

        let Some(index) = self.find(from) else {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such entry"));
        };

        if let Some(existing) = self.find(to) {
            if existing == index {
                // Case-only rename onto itself: the volume keeps the old name.
                return Ok(());
            }
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "destination exists",
            ));
        }

        let from = self.nodes.borrow()[index].path.clone();
        let mut nodes = self.nodes.borrow_mut();
        for node in nodes.iter_mut() {
            if let Ok(rest) = node.path.strip_prefix(&from) {
                node.path = if rest.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(rest)
                };
            }
        }
        Ok(())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        if self.find(path).is_none() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such entry"));
        }
        let keep: Vec<Node> = self
            .nodes
            .borrow()
            .iter()
            .filter(|n| !self.within(&n.path, path))
            .cloned()
            .collect();
        *self.nodes.borrow_mut() = keep;
        Ok(())
    }
}
