use std::{
    fs, io,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{FsError, FsOp};

/// Permission bits for generated files and directories (rwxr-xr-x).
#[cfg(unix)]
const MODE: u32 = 0o755;

/// A generated file: a path relative to an output root plus its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    content: Vec<u8>,
}

impl File {
    /// Create a new file with the given relative path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the path relative to the output root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Get the content as text, replacing invalid UTF-8.
    pub fn content_lossy(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    /// Write the file below `base`, replacing any previous content.
    pub fn write(&self, base: &Path) -> Result<PathBuf, FsError> {
        let path = base.join(&self.path);
        write_file(&path, &self.content)?;
        Ok(path)
    }
}

/// Create a directory and its parents. An existing directory is not an error.
pub fn create_dir(path: &Path) -> Result<(), FsError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(MODE);
    }
    builder
        .create(path)
        .map_err(|e| FsError::new(FsOp::CreateDir, path, e))
}

/// Write `content` to `path`, truncating any existing file.
///
/// The parent directory must already exist.
pub fn write_file(path: &Path, content: &[u8]) -> Result<(), FsError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(MODE);
    }

    let write = || -> io::Result<()> {
        let mut file = options.open(path)?;
        file.write_all(content)?;
        file.sync_all()
    };
    write().map_err(|e| FsError::new(FsOp::Write, path, e))
}

/// Remove a directory tree. Returns false if it did not exist.
pub fn remove_tree(path: &Path) -> Result<bool, FsError> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FsError::new(FsOp::Remove, path, e)),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.js");

        write_file(&path, b"hello").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.js");

        write_file(&path, b"first, and longer").unwrap();
        write_file(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_write_file_missing_parent_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("test.js");

        let err = write_file(&path, b"x").unwrap_err();

        assert_eq!(err.op, FsOp::Write);
        assert_eq!(err.path, path);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("pkg");
        create_dir(&dir).unwrap();
        let path = File::new("pkg/Greeter.js", "x").write(temp.path()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // umask may clear bits but never adds any
        assert_eq!(mode & !0o755, 0);
        assert_eq!(mode & 0o700, 0o700);
    }

    #[test]
    fn test_create_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a").join("b");

        create_dir(&dir).unwrap();
        create_dir(&dir).unwrap();

        assert!(dir.is_dir());
    }

    #[test]
    fn test_create_dir_over_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("taken");
        fs::write(&path, "not a directory").unwrap();

        let err = create_dir(&path).unwrap_err();

        assert_eq!(err.op, FsOp::CreateDir);
        assert!(err.to_string().contains("taken"));
    }

    #[test]
    fn test_file_write_under_base() {
        let temp = TempDir::new().unwrap();
        let file = File::new("index.js", "export {};\n");

        let written = file.write(temp.path()).unwrap();

        assert_eq!(written, temp.path().join("index.js"));
        assert_eq!(file.content_lossy(), "export {};\n");
        assert_eq!(fs::read(&written).unwrap(), file.content());
    }

    #[test]
    fn test_remove_tree() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("backend");
        create_dir(&dir.join("pkg")).unwrap();

        assert!(remove_tree(&dir).unwrap());
        assert!(!dir.exists());
        assert!(!remove_tree(&dir).unwrap());
    }
}
