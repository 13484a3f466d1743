//! Clean command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from removing generated output.
#[derive(Debug)]
pub struct CleanReport {
    pub output_root: PathBuf,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Whether the output root was (or would be) removed.
    pub removed: bool,
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        if !self.removed {
            out.preformatted("No generated files found.");
            return;
        }

        if self.dry_run {
            out.section("Would delete");
        } else {
            out.section("Deleted");
        }
        out.removed_item(&self.output_root.display().to_string());
    }
}
