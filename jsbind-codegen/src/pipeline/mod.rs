//! Generation pipeline.
//!
//! [`Pipeline`] runs one generation end to end:
//!
//! ```text
//! acquire → validate → load templates → stage → index → packages → publish
//! ```
//!
//! Every stage is fatal: the first failure aborts the run and is reported as
//! a [`PipelineError`](crate::PipelineError) naming the stage. All files are
//! written into a staging directory, so a failed run leaves the output root
//! exactly as it was.
//!
//! # Example
//!
//! ```ignore
//! use jsbind_codegen::{GeneratorOptions, Pipeline};
//!
//! let pipeline = Pipeline::new(GeneratorOptions::new("/path/to/project"));
//! let report = pipeline.run(&packages)?;
//! println!("wrote {} files", report.files.len());
//! ```

mod options;
mod report;
mod runner;

pub use options::GeneratorOptions;
pub use report::{GenerateReport, PreviewFile};
pub use runner::Pipeline;
