use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// The filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    CreateDir,
    Write,
    Rename,
    Remove,
    Read,
    Restore,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsOp::CreateDir => write!(f, "create directory"),
            FsOp::Write => write!(f, "write"),
            FsOp::Rename => write!(f, "move"),
            FsOp::Remove => write!(f, "remove"),
            FsOp::Read => write!(f, "read"),
            FsOp::Restore => write!(f, "restore previous output from"),
        }
    }
}

/// A filesystem failure, carrying the offending path.
#[derive(Debug, Error)]
#[error("failed to {op} '{}'", path.display())]
pub struct FsError {
    pub op: FsOp,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FsError {
    pub fn new(op: FsOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            op,
            path: path.into(),
            source,
        }
    }

    /// Rebase the path from one root onto another. Paths outside `from`
    /// are kept.
    pub fn relocate(mut self, from: &Path, to: &Path) -> Self {
        if let Ok(relative) = self.path.strip_prefix(from) {
            self.path = to.join(relative);
        }
        self
    }
}
