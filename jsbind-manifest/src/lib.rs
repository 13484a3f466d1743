//! Descriptor files and project configuration for jsbind.
//!
//! - [`DescriptorFile`] reads a serialized descriptor tree (JSON or TOML)
//! - [`Config`] reads `jsbind.toml`
//!
//! Errors carry source spans and render through [`miette`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod descriptors;
mod error;

pub use config::{
    CONFIG_FILE, Config, GenerateConfig, OutputConfig, Publish, TemplatesConfig,
};
pub use descriptors::{DescriptorFile, Format, parse};
pub use error::{Error, Result, SourceContext};
