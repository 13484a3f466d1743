//! Descriptor files: a serialized descriptor tree produced by a source parser.
//!
//! Two formats are accepted, chosen by file extension:
//!
//! - JSON: either a top-level array of packages or `{ "packages": [...] }`
//! - TOML: `[[packages]]` tables

use std::path::{Path, PathBuf};

use jsbind_ir::Package;
use serde::Deserialize;

use crate::{Error, Result, error::SourceContext};

/// Serialization format of a descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct JsonDocument {
    packages: Vec<Package>,
}

#[derive(Deserialize)]
struct TomlDocument {
    #[serde(default)]
    packages: Vec<Package>,
}

/// A parsed descriptor file.
#[derive(Debug, Clone)]
pub struct DescriptorFile {
    path: PathBuf,
    packages: Vec<Package>,
}

impl DescriptorFile {
    /// Open and parse a descriptor file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let format = Format::from_path(&path)
            .ok_or_else(|| Box::new(Error::UnsupportedFormat { path: path.clone() }))?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let packages = parse(&content, format, &path.display().to_string())?;

        Ok(Self { path, packages })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed packages.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Consume the file, returning the packages.
    pub fn into_packages(self) -> Vec<Package> {
        self.packages
    }
}

/// Parse descriptor content in the given format.
pub fn parse(content: &str, format: Format, filename: &str) -> Result<Vec<Package>> {
    let source_ctx = SourceContext::new(content, filename);
    match format {
        Format::Json => {
            let packages = if content.trim_start().starts_with('[') {
                serde_json::from_str::<Vec<Package>>(content)
            } else {
                serde_json::from_str::<JsonDocument>(content).map(|doc| doc.packages)
            };
            packages.map_err(|e| source_ctx.json_error(e))
        }
        Format::Toml => {
            let doc: TomlDocument =
                toml::from_str(content).map_err(|e| source_ctx.toml_error(e))?;
            Ok(doc.packages)
        }
    }
}
