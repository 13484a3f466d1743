//! Output tree layout.
//!
//! All paths produced here are relative to the output root, except
//! [`OutputLayout::output_root`] which joins the output dir onto a project root.

use std::path::{Component, Path, PathBuf};

use jsbind_manifest::OutputConfig;
use thiserror::Error;

/// Output root relative to the project root.
pub const OUTPUT_DIR: &str = "frontend/backend";

/// Aggregate index file name.
pub const INDEX_FILE: &str = "index.js";

/// Extension of per-struct implementation files.
pub const IMPLEMENTATION_EXT: &str = "js";

/// Extension of per-struct declaration files.
pub const DECLARATION_EXT: &str = "d.ts";

/// A layout that would place output outside its own directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid output {field} '{value}': {reason}")]
pub struct LayoutError {
    pub field: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl LayoutError {
    fn new(field: &'static str, value: impl Into<String>, reason: &'static str) -> Self {
        Self {
            field,
            value: value.into(),
            reason,
        }
    }
}

/// Where generated files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub dir: PathBuf,
    pub index: String,
    pub implementation_ext: String,
    pub declaration_ext: String,
}

impl OutputLayout {
    /// Check that the layout stays below the project root.
    ///
    /// The output root is replaced wholesale on publish and removed by
    /// `clean`, so it must be a proper subdirectory: relative, non-empty,
    /// made of plain names only. File names and extensions must be single
    /// path segments.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let dir = self.dir.to_string_lossy();
        if self.dir.as_os_str().is_empty() {
            return Err(LayoutError::new("dir", dir, "must not be empty"));
        }
        if !self
            .dir
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(LayoutError::new(
                "dir",
                dir,
                "must be a relative path without '.' or '..'",
            ));
        }

        for (field, value) in [
            ("index", &self.index),
            ("implementation_ext", &self.implementation_ext),
            ("declaration_ext", &self.declaration_ext),
        ] {
            if !is_segment(value) {
                return Err(LayoutError::new(
                    field,
                    value.as_str(),
                    "must be a single path segment",
                ));
            }
        }
        Ok(())
    }

    pub fn output_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.dir)
    }

    pub fn index_path(&self) -> PathBuf {
        PathBuf::from(&self.index)
    }

    /// One directory per package.
    pub fn package_dir(&self, package: &str) -> PathBuf {
        PathBuf::from(package)
    }

    pub fn implementation_path(&self, package: &str, strct: &str) -> PathBuf {
        self.package_dir(package)
            .join(format!("{}.{}", strct, self.implementation_ext))
    }

    pub fn declaration_path(&self, package: &str, strct: &str) -> PathBuf {
        self.package_dir(package)
            .join(format!("{}.{}", strct, self.declaration_ext))
    }
}

fn is_segment(value: &str) -> bool {
    !value.is_empty() && value != "." && value != ".." && !value.contains(['/', '\\'])
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(OUTPUT_DIR),
            index: INDEX_FILE.to_string(),
            implementation_ext: IMPLEMENTATION_EXT.to_string(),
            declaration_ext: DECLARATION_EXT.to_string(),
        }
    }
}

impl From<&OutputConfig> for OutputLayout {
    fn from(config: &OutputConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            index: config.index.clone(),
            implementation_ext: config.implementation_ext.clone(),
            declaration_ext: config.declaration_ext.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = OutputLayout::default();

        assert_eq!(
            layout.output_root(Path::new("/project")),
            Path::new("/project/frontend/backend")
        );
        assert_eq!(layout.index_path(), Path::new("index.js"));
        assert_eq!(
            layout.implementation_path("mypackage", "Greeter"),
            Path::new("mypackage/Greeter.js")
        );
        assert_eq!(
            layout.declaration_path("mypackage", "Greeter"),
            Path::new("mypackage/Greeter.d.ts")
        );
    }

    #[test]
    fn test_layout_from_config_matches_default() {
        assert_eq!(
            OutputLayout::from(&OutputConfig::default()),
            OutputLayout::default()
        );
    }

    #[test]
    fn test_default_layout_is_valid() {
        assert_eq!(OutputLayout::default().validate(), Ok(()));
        assert_eq!(
            OutputLayout {
                dir: PathBuf::from("web/gen"),
                implementation_ext: "mjs".to_string(),
                ..OutputLayout::default()
            }
            .validate(),
            Ok(())
        );
    }

    #[test]
    fn test_output_dir_must_be_a_subdirectory() {
        for dir in ["", ".", "..", "./", "../out", "frontend/../..", "/abs/out"] {
            let layout = OutputLayout {
                dir: PathBuf::from(dir),
                ..OutputLayout::default()
            };

            let err = layout.validate().unwrap_err();
            assert_eq!(err.field, "dir", "dir {dir:?}");
        }
    }

    #[test]
    fn test_file_names_must_be_single_segments() {
        let layout = OutputLayout {
            index: "../x.js".to_string(),
            ..OutputLayout::default()
        };
        assert_eq!(
            layout.validate().unwrap_err().to_string(),
            "invalid output index '../x.js': must be a single path segment"
        );

        for ext in ["", "..", "js/x", "js\\x"] {
            let layout = OutputLayout {
                declaration_ext: ext.to_string(),
                ..OutputLayout::default()
            };
            assert_eq!(layout.validate().unwrap_err().field, "declaration_ext");
        }
    }

    #[test]
    fn test_custom_extensions() {
        let layout = OutputLayout {
            implementation_ext: "mjs".to_string(),
            declaration_ext: "d.mts".to_string(),
            ..OutputLayout::default()
        };

        assert_eq!(
            layout.implementation_path("app", "Store"),
            Path::new("app/Store.mjs")
        );
        assert_eq!(
            layout.declaration_path("app", "Store"),
            Path::new("app/Store.d.mts")
        );
    }
}
