//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from binding generation.
#[derive(Debug)]
pub struct GenerationReport {
    pub package_count: usize,
    pub struct_count: usize,
    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of binding generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Written files, relative to the project root.
    pub files: Vec<String>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

impl Report for GenerationReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl GenerationReport {
    fn summary(&self) -> String {
        format!(
            "{} package{}, {} struct{}",
            self.package_count,
            plural(self.package_count),
            self.struct_count,
            plural(self.struct_count)
        )
    }

    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.section(&format!("Generated ({})", self.summary()));
        for file in &written.files {
            out.added_item(file);
        }
        out.newline();
        out.key_value("Output", &written.output_dir.display().to_string());
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[PreviewFile]) {
        for file in files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} files would be generated ({})",
            files.len(),
            self.summary()
        ));
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
