//! Core utilities for the jsbind binding generator.
//!
//! This crate provides the filesystem primitives shared by code generation:
//! generated files with fixed permissions, a staging directory that is
//! published atomically into the output tree, and naming helpers.

mod error;
mod file;
mod staging;
mod utils;

pub use error::{FsError, FsOp};
pub use file::{File, create_dir, remove_tree, write_file};
pub use staging::{PublishMode, Staging};
pub use utils::{to_camel_case, to_pascal_case, to_snake_case};
