use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum ListerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// Make sure `path` is an existing directory.
pub fn require_directory(path: &Path) -> Result<(), ListerError> {
    if !path.exists() {
        return Err(ListerError::PathNotFound(path.to_path_buf()));
    }

    if !path.is_dir() {
        return Err(ListerError::NotADirectory(path.to_path_buf()));
    }

    Ok(())
}

/// Names of the directories directly inside `parent`, sorted by name.
///
/// Hidden directories are included; files are not.
pub fn list_child_directories(parent: &Path) -> Result<Vec<String>, ListerError> {
    debug!(path = ?parent, "Listing child directories");

    require_directory(parent)?;

    let read_dir = fs::read_dir(parent).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ListerError::PermissionDenied(parent.to_path_buf())
        } else {
            ListerError::IoError(e)
        }
    })?;

    let mut names = Vec::new();

    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();

        if !path.is_dir() {
            trace!(path = ?path, "Skipping non-directory");
            continue;
        }

        names.push(entry.file_name().to_string_lossy().to_string());
    }

    names.sort();

    debug!(count = names.len(), "Listing complete");

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_empty_directory() {
        let dir = tempdir().unwrap();
        let result = list_child_directories(dir.path()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_ignores_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        fs::write(dir.path().join("file.txt"), "content").unwrap();

        let result = list_child_directories(dir.path()).unwrap();

        assert_eq!(result, vec!["subdir"]);
    }

    #[test]
    fn test_includes_hidden_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".hidden")).unwrap();
        fs::create_dir(dir.path().join("visible")).unwrap();

        let result = list_child_directories(dir.path()).unwrap();

        assert_eq!(result, vec![".hidden", "visible"]);
    }

    #[test]
    fn test_does_not_descend() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("outer").join("inner")).unwrap();

        let result = list_child_directories(dir.path()).unwrap();

        assert_eq!(result, vec!["outer"]);
    }

    #[test]
    fn test_lexicographic_sorting() {
        let dir = tempdir().unwrap();
        for name in ["zebra", "alpha", "Beta", "10", "2"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }

        let result = list_child_directories(dir.path()).unwrap();

        assert_eq!(result, vec!["10", "2", "Beta", "alpha", "zebra"]);
    }

    #[test]
    fn test_path_not_found() {
        let result = list_child_directories(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(ListerError::PathNotFound(_))));
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("file.txt");
        fs::write(&file_path, "content").unwrap();

        let result = list_child_directories(&file_path);
        assert!(matches!(result, Err(ListerError::NotADirectory(_))));
    }
}
