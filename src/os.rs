//! Host filesystem and environment access.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// The handful of host operations the core needs outside of command
/// execution. Injected so tests can observe deletions and control the
/// environment.
pub trait OsOps {
    /// Delete a single file from the working tree.
    fn remove_file(&self, path: &Path) -> Result<(), Error>;
    /// Append one line to a file, creating the file if absent. No
    /// deduplication.
    fn append_line_to_file(&self, path: &Path, line: &str) -> Result<(), Error>;
    /// Read an environment variable; unset (or non-UTF-8) reads as `None`.
    fn env_var(&self, key: &str) -> Option<String>;
}

/// Real host implementation rooted at the working-tree directory. Relative
/// paths from file records resolve against that root.
pub struct SystemOs {
    root: PathBuf,
}

impl SystemOs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl OsOps for SystemOs {
    fn remove_file(&self, path: &Path) -> Result<(), Error> {
        std::fs::remove_file(self.resolve(path))?;
        Ok(())
    }

    fn append_line_to_file(&self, path: &Path, line: &str) -> Result<(), Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.resolve(path))?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    fn env_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_creates_and_extends() {
        let dir = tempfile::tempdir().unwrap();
        let os = SystemOs::new(dir.path());

        os.append_line_to_file(Path::new(".gitignore"), "target/")
            .unwrap();
        os.append_line_to_file(Path::new(".gitignore"), "*.log")
            .unwrap();

        let text = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(text, "target/\n*.log\n");
    }

    #[test]
    fn remove_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("junk.txt"), "x").unwrap();

        let os = SystemOs::new(dir.path());
        os.remove_file(Path::new("junk.txt")).unwrap();
        assert!(!dir.path().join("junk.txt").exists());
    }

    #[test]
    fn remove_missing_file_propagates_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let os = SystemOs::new(dir.path());
        let err = os.remove_file(Path::new("absent.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
