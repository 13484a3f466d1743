//! Descriptor acquisition.

use std::path::{Path, PathBuf};

use jsbind_ir::Package;
use jsbind_manifest::DescriptorFile;

use crate::error::BoxError;

/// Produces the descriptor tree for a run.
///
/// The source parser that turns backend declarations into packages lives
/// outside this crate; anything that can hand over a `Vec<Package>`
/// implements this trait.
pub trait DescriptorSource {
    fn acquire(&self) -> Result<Vec<Package>, BoxError>;
}

impl DescriptorSource for [Package] {
    fn acquire(&self) -> Result<Vec<Package>, BoxError> {
        Ok(self.to_vec())
    }
}

impl DescriptorSource for Vec<Package> {
    fn acquire(&self) -> Result<Vec<Package>, BoxError> {
        Ok(self.clone())
    }
}

impl<T: DescriptorSource + ?Sized> DescriptorSource for &T {
    fn acquire(&self) -> Result<Vec<Package>, BoxError> {
        (**self).acquire()
    }
}

/// A descriptor file on disk, JSON or TOML by extension.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DescriptorSource for FileSource {
    fn acquire(&self) -> Result<Vec<Package>, BoxError> {
        let file = DescriptorFile::open(&self.path)?;
        tracing::debug!(
            path = %file.path().display(),
            packages = file.packages().len(),
            "descriptor file loaded"
        );
        Ok(file.into_packages())
    }
}

/// A closure producing the descriptor tree.
pub struct FnSource<F>(F);

impl<F> FnSource<F>
where
    F: Fn() -> Result<Vec<Package>, BoxError>,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> DescriptorSource for FnSource<F>
where
    F: Fn() -> Result<Vec<Package>, BoxError>,
{
    fn acquire(&self) -> Result<Vec<Package>, BoxError> {
        (self.0)()
    }
}
