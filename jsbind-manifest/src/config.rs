//! Project configuration from `jsbind.toml`.
//!
//! Every key is optional; a missing file yields the defaults, which reproduce
//! the standard `frontend/backend` layout.

use std::path::{Path, PathBuf};

use jsbind_core::PublishMode;
use serde::Deserialize;

use crate::{Error, Result, error::SourceContext};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "jsbind.toml";

/// Root of `jsbind.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Descriptor file produced by the source parser.
    pub descriptors: Option<PathBuf>,
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Directory holding `index.js.tera`, `package.js.tera` and
    /// `package.d.ts.tera`. Relative paths resolve against the project root.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output root, relative to the project root.
    pub dir: PathBuf,
    /// Index file name inside the output root.
    pub index: String,
    pub implementation_ext: String,
    pub declaration_ext: String,
    pub publish: Publish,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("frontend").join("backend"),
            index: "index.js".to_string(),
            implementation_ext: "js".to_string(),
            declaration_ext: "d.ts".to_string(),
            publish: Publish::default(),
        }
    }
}

/// How generated output replaces the previous output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Publish {
    #[default]
    Swap,
    Overlay,
}

impl From<Publish> for PublishMode {
    fn from(publish: Publish) -> Self {
        match publish {
            Publish::Swap => PublishMode::Swap,
            Publish::Overlay => PublishMode::Overlay,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Worker threads used to render structs. Defaults to 1.
    pub jobs: Option<usize>,
}

impl Config {
    /// Parse a configuration file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a configuration file, or return the defaults if it does not exist.
    pub fn open_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::open(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a string with a filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let source_ctx = SourceContext::new(content, filename);
        toml::from_str(content).map_err(|e| source_ctx.toml_error(e))
    }
}
