//! Staged output with atomic publish.
//!
//! Every file of a run is first written into a private staging directory
//! created next to the output root (same filesystem, so renames are atomic).
//! Nothing under the output root changes until [`Staging::publish`] runs;
//! a failed run simply drops the staging directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::{FsError, FsOp, create_dir};

const STAGING_PREFIX: &str = ".jsbind-staging-";
const TREE: &str = "tree";
const PREVIOUS: &str = "previous";

/// How a staged tree replaces the output root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishMode {
    /// Replace the whole output root with the staged tree.
    ///
    /// Files that are no longer generated disappear.
    #[default]
    Swap,
    /// Move staged files one by one into the existing output root.
    ///
    /// Files the run did not produce are left in place.
    Overlay,
}

/// A staging area for one output root.
#[derive(Debug)]
pub struct Staging {
    dir: TempDir,
    target: PathBuf,
}

impl Staging {
    /// Create a staging area for `target`, creating the target's parent if needed.
    pub fn new(target: impl Into<PathBuf>) -> Result<Self, FsError> {
        let target = target.into();
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        create_dir(&parent)?;

        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&parent)
            .map_err(|e| FsError::new(FsOp::CreateDir, &parent, e))?;
        create_dir(&dir.path().join(TREE))?;

        tracing::debug!(staging = %dir.path().display(), target = %target.display(), "staging created");
        Ok(Self { dir, target })
    }

    /// Root of the staged tree; write generated files below this path.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join(TREE)
    }

    /// Move the staged tree into the output root.
    pub fn publish(self, mode: PublishMode) -> Result<(), FsError> {
        match mode {
            PublishMode::Swap => self.swap(|from, to| fs::rename(from, to)),
            PublishMode::Overlay => overlay(&self.root(), &self.target),
        }
    }

    /// Swap the staged tree in using `rename`.
    ///
    /// If the staged tree cannot be moved in and the previous tree cannot be
    /// moved back either, the staging directory is kept on disk so the
    /// previous output survives, and the error names where it is.
    fn swap<R>(self, mut rename: R) -> Result<(), FsError>
    where
        R: FnMut(&Path, &Path) -> io::Result<()>,
    {
        let tree = self.root();
        let previous = self.dir.path().join(PREVIOUS);

        let had_previous = match fs::symlink_metadata(&self.target) {
            Ok(meta) if meta.is_dir() => true,
            Ok(_) => {
                return Err(FsError::new(
                    FsOp::Rename,
                    &self.target,
                    io::Error::from(io::ErrorKind::NotADirectory),
                ));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => return Err(FsError::new(FsOp::Read, &self.target, e)),
        };

        if had_previous {
            rename(&self.target, &previous)
                .map_err(|e| FsError::new(FsOp::Rename, &self.target, e))?;
        }

        if let Err(e) = rename(&tree, &self.target) {
            if had_previous {
                if let Err(restore) = rename(&previous, &self.target) {
                    let kept = self.dir.keep().join(PREVIOUS);
                    tracing::error!(
                        error = %e,
                        previous = %kept.display(),
                        "failed to publish output and to restore the previous output"
                    );
                    return Err(FsError::new(FsOp::Restore, kept, restore));
                }
            }
            return Err(FsError::new(FsOp::Rename, &self.target, e));
        }

        // The retired tree is removed together with the staging directory.
        Ok(())
    }
}

fn overlay(from: &Path, to: &Path) -> Result<(), FsError> {
    create_dir(to)?;

    let entries = fs::read_dir(from).map_err(|e| FsError::new(FsOp::Read, from, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| FsError::new(FsOp::Read, from, e))?;
        let source = entry.path();
        let dest = to.join(entry.file_name());
        let file_type = entry
            .file_type()
            .map_err(|e| FsError::new(FsOp::Read, &source, e))?;

        if file_type.is_dir() {
            overlay(&source, &dest)?;
        } else {
            fs::rename(&source, &dest).map_err(|e| FsError::new(FsOp::Rename, &dest, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::File;

    fn stage(target: &Path, files: &[(&str, &str)]) -> Staging {
        let staging = Staging::new(target).unwrap();
        for (path, content) in files {
            let file = File::new(*path, *content);
            if let Some(parent) = file.path().parent() {
                create_dir(&staging.root().join(parent)).unwrap();
            }
            file.write(&staging.root()).unwrap();
        }
        staging
    }

    #[test]
    fn test_nothing_visible_before_publish() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("frontend").join("backend");

        let staging = stage(&target, &[("index.js", "x")]);

        assert!(!target.exists());
        assert!(staging.root().join("index.js").exists());
    }

    #[test]
    fn test_swap_replaces_tree() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("backend");
        create_dir(&target.join("stale")).unwrap();
        fs::write(target.join("stale").join("Old.js"), "old").unwrap();

        stage(&target, &[("index.js", "new"), ("pkg/Greeter.js", "g")])
            .publish(PublishMode::Swap)
            .unwrap();

        assert_eq!(fs::read_to_string(target.join("index.js")).unwrap(), "new");
        assert!(target.join("pkg").join("Greeter.js").exists());
        assert!(!target.join("stale").exists());
    }

    #[test]
    fn test_swap_cleans_up_staging() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("backend");

        stage(&target, &[("index.js", "a")])
            .publish(PublishMode::Swap)
            .unwrap();
        stage(&target, &[("index.js", "b")])
            .publish(PublishMode::Swap)
            .unwrap();

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(leftovers, vec!["backend".to_string()]);
    }

    #[test]
    fn test_swap_rejects_file_in_place_of_root() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("backend");
        fs::write(&target, "a file").unwrap();

        let err = stage(&target, &[("index.js", "x")])
            .publish(PublishMode::Swap)
            .unwrap_err();

        assert_eq!(err.path, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "a file");
    }

    #[test]
    fn test_overlay_keeps_foreign_files() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("backend");
        create_dir(&target.join("pkg")).unwrap();
        fs::write(target.join("README.md"), "keep me").unwrap();
        fs::write(target.join("pkg").join("Greeter.js"), "old").unwrap();

        stage(&target, &[("pkg/Greeter.js", "new")])
            .publish(PublishMode::Overlay)
            .unwrap();

        assert_eq!(fs::read_to_string(target.join("README.md")).unwrap(), "keep me");
        assert_eq!(
            fs::read_to_string(target.join("pkg").join("Greeter.js")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_dropped_staging_leaves_no_trace() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("backend");

        drop(stage(&target, &[("index.js", "x")]));

        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_restore_keeps_previous_output() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("backend");
        create_dir(&target).unwrap();
        fs::write(target.join("index.js"), "old").unwrap();

        // Only the first rename (retiring the previous tree) succeeds.
        let mut calls = 0;
        let err = stage(&target, &[("index.js", "new")])
            .swap(|from, to| {
                calls += 1;
                if calls == 1 {
                    fs::rename(from, to)
                } else {
                    Err(io::Error::from(io::ErrorKind::PermissionDenied))
                }
            })
            .unwrap_err();

        assert_eq!(err.op, FsOp::Restore);
        assert!(err.path.ends_with(PREVIOUS));
        assert_eq!(fs::read_to_string(err.path.join("index.js")).unwrap(), "old");
        assert!(err.to_string().starts_with("failed to restore previous output from"));
    }

    #[test]
    fn test_failed_swap_restores_previous_output() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("backend");
        create_dir(&target).unwrap();
        fs::write(target.join("index.js"), "old").unwrap();

        let mut calls = 0;
        let err = stage(&target, &[("index.js", "new")])
            .swap(|from, to| {
                calls += 1;
                if calls == 2 {
                    Err(io::Error::from(io::ErrorKind::PermissionDenied))
                } else {
                    fs::rename(from, to)
                }
            })
            .unwrap_err();

        assert_eq!(err.op, FsOp::Rename);
        assert_eq!(err.path, target);
        assert_eq!(fs::read_to_string(target.join("index.js")).unwrap(), "old");
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }
}
