//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from checking descriptors and templates.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the descriptor file.
    pub descriptors: PathBuf,
    pub package_count: usize,
    pub struct_count: usize,
    pub method_count: usize,
    /// Files a run would write.
    pub file_count: usize,
    /// Error messages.
    pub errors: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.descriptors.display()));
        out.newline();
        out.key_value("  Packages", &self.package_count.to_string());
        out.key_value("  Structs", &self.struct_count.to_string());
        out.key_value("  Methods", &self.method_count.to_string());
        out.key_value("  Files", &self.file_count.to_string());
    }
}
