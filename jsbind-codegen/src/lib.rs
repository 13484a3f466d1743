//! Template-driven binding generation for jsbind.
//!
//! Turns a descriptor tree into JavaScript bindings: one implementation file
//! and one declaration file per struct, plus an index over every package.
//!
//! ```text
//! frontend/backend/
//! ├── index.js
//! └── <package>/
//!     ├── <Struct>.js
//!     └── <Struct>.d.ts
//! ```
//!
//! # Module Organization
//!
//! - [`template`] - Template engine capability, sources and the Tera engine
//! - [`unit`] - Per-struct render context and paired rendering
//! - [`emit`] - Index and package emitters
//! - [`pipeline`] - End-to-end orchestration with staged, atomic publish
//! - [`source`] - Descriptor acquisition
//! - [`testing`] - Test utilities (feature-gated)

pub mod emit;
mod error;
pub mod layout;
pub mod pipeline;
pub mod source;
pub mod template;
pub mod typescript;
pub mod unit;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{BoxError, Error, PipelineError, Stage};
pub use layout::{LayoutError, OutputLayout};
pub use pipeline::{GenerateReport, GeneratorOptions, Pipeline, PreviewFile};
pub use source::{DescriptorSource, FileSource, FnSource};
pub use template::{
    Renderer, TemplateEngine, TemplateError, TemplateSource, TemplateSources, TemplateTarget,
    TeraEngine,
};
