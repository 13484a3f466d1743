//! Generate operation - bindings from a descriptor tree.

use eyre::{Context, Result};
use jsbind_codegen::{GeneratorOptions, Pipeline};
use jsbind_ir::Package;

use crate::reports::{GenerationReport, GenerationResult, PreviewFile, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions {
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
pub fn generate(
    packages: &[Package],
    options: GeneratorOptions,
    opts: GenerateOptions,
) -> Result<GenerationReport> {
    let pipeline = Pipeline::new(options);

    let result = if opts.dry_run {
        let files = pipeline
            .preview(packages)
            .wrap_err("Failed to render bindings")?
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path.display().to_string(),
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(files)
    } else {
        let report = pipeline
            .run(packages)
            .wrap_err("Failed to generate bindings")?;
        GenerationResult::Written(WrittenResult {
            output_dir: report.output_root,
            files: report
                .files
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        })
    };

    Ok(GenerationReport {
        package_count: packages.len(),
        struct_count: packages.iter().map(|p| p.structs.len()).sum(),
        result,
    })
}
