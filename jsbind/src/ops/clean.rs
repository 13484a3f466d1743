//! Clean operation - remove the generated output directory.

use eyre::{Context, Result};
use jsbind_codegen::GeneratorOptions;
use jsbind_core::remove_tree;

use crate::reports::CleanReport;

/// Options for the clean operation.
pub struct CleanOptions {
    /// Whether to preview without deleting.
    pub dry_run: bool,
}

/// Execute the clean operation.
pub fn clean(options: &GeneratorOptions, opts: CleanOptions) -> Result<CleanReport> {
    options
        .layout
        .validate()
        .wrap_err("Refusing to clean output directory")?;
    let output_root = options.output_root();

    let removed = if opts.dry_run {
        output_root.exists()
    } else {
        remove_tree(&output_root).wrap_err("Failed to remove generated files")?
    };

    Ok(CleanReport {
        output_root,
        dry_run: opts.dry_run,
        removed,
    })
}
