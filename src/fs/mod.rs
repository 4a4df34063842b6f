//! Filesystem access used by the rename engine.
//!
//! The planner and executor only ever need a handful of operations on a
//! single parent directory. They go through the [`Filesystem`] trait so the
//! same code runs against the real disk ([`StdFilesystem`]) and against an
//! in-memory double in tests, which can behave like a case-insensitive
//! volume or fail on demand.

#[cfg(test)]
mod memory;

#[cfg(test)]
pub use memory::MemoryFilesystem;

use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

/// The filesystem operations the rename engine depends on.
pub trait Filesystem {
    /// Whether anything (file, directory, or symlink, even a dangling one) is at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory, without following a final symlink.
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the entries directly inside `dir`, exactly as stored.
    fn entry_names(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Rename `from` to `to`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove `path`; directories are removed with their contents.
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Whether the parent of `path` holds an entry whose name matches the
    /// final component of `path` byte for byte.
    ///
    /// On a case-insensitive volume `exists("report")` is true when only
    /// `Report` is present; this is not.
    fn has_exact_entry(&self, path: &Path) -> io::Result<bool> {
        let Some(name) = path.file_name() else {
            return Ok(false);
        };
        let name = name.to_string_lossy();
        let names = self.entry_names(parent_dir(path))?;
        Ok(names.iter().any(|n| *n == name))
    }
}

/// Parent directory of `path`, with `.` standing in for a bare relative name.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// [`Filesystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|m| m.file_type().is_dir())
            .unwrap_or(false)
    }

    fn entry_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            names.push(entry?.file_name().to_string_lossy().to_string());
        }
        Ok(names)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        trace!(from = ?from, to = ?to, "fs::rename");
        fs::rename(from, to)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        if self.is_dir(path) {
            trace!(path = ?path, "fs::remove_dir_all");
            fs::remove_dir_all(path)
        } else {
            trace!(path = ?path, "fs::remove_file");
            fs::remove_file(path)
        }
    }
}
