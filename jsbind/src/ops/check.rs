//! Check operation - render everything in memory and report problems.

use std::{error::Error as _, path::PathBuf};

use jsbind_codegen::{GeneratorOptions, Pipeline};
use jsbind_ir::Package;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the whole pipeline except for writing, so template and descriptor
/// problems surface without touching the output directory.
pub fn check(packages: &[Package], descriptors: PathBuf, options: GeneratorOptions) -> CheckReport {
    let mut report = CheckReport {
        descriptors,
        package_count: packages.len(),
        struct_count: packages.iter().map(|p| p.structs.len()).sum(),
        method_count: packages.iter().map(Package::method_count).sum(),
        file_count: 0,
        errors: Vec::new(),
    };

    match Pipeline::new(options).preview(packages) {
        Ok(files) => report.file_count = files.len(),
        Err(e) => {
            let mut chain = vec![e.to_string()];
            let mut source = e.source();
            while let Some(cause) = source {
                chain.push(cause.to_string());
                source = cause.source();
            }
            report.errors.push(chain.join(": "));
        }
    }

    report
}
