//! Pipeline results.

use std::path::PathBuf;

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// The output root the tree was published into.
    pub output_root: PathBuf,
    /// Written files relative to the project root: the index first, then
    /// each struct's pair in tree order.
    pub files: Vec<PathBuf>,
    pub package_count: usize,
    pub struct_count: usize,
}

/// A file rendered in memory by [`Pipeline::preview`](super::Pipeline::preview).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Path relative to the project root
    pub path: PathBuf,
    /// File content
    pub content: String,
}
