//! Log path resolution
//!
//! Callers name log files relative to a configured root. The resolved path
//! is always `root.join(relative)`; absolute paths and `..` components are
//! rejected before the filesystem is touched.

use std::path::{Component, Path, PathBuf};

/// Resolution errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("logpath parameter is required")]
    Empty,

    #[error("logpath must be relative to the log root: {0}")]
    Absolute(String),

    #[error("logpath must not leave the log root: {0}")]
    Traversal(String),

    #[error("log file not found: {0}")]
    NotFound(String),
}

/// Directory that all served log files live under.
#[derive(Debug, Clone)]
pub struct LogRoot {
    root: PathBuf,
}

impl LogRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Join `logpath` onto the root without touching the filesystem.
    pub fn join(&self, logpath: &str) -> Result<PathBuf, ResolveError> {
        if logpath.trim().is_empty() {
            return Err(ResolveError::Empty);
        }

        let relative = Path::new(logpath);
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => return Err(ResolveError::Traversal(logpath.to_string())),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(ResolveError::Absolute(logpath.to_string()))
                }
            }
        }

        Ok(self.root.join(relative))
    }

    /// Join `logpath` onto the root and require a regular file there.
    pub fn resolve(&self, logpath: &str) -> Result<PathBuf, ResolveError> {
        let path = self.join(logpath)?;
        if path.is_file() {
            Ok(path)
        } else {
            Err(ResolveError::NotFound(logpath.to_string()))
        }
    }
}
