//! Descriptor model for the jsbind binding generator.
//!
//! This crate provides the language-neutral tree that describes exported
//! backend structs and their methods, grouped into packages. The tree is
//! produced upstream (by a source parser) and only read by code generation.
//!
//! # Architecture
//!
//! ```text
//! source parser → Vec<Package> (jsbind-ir) → templates (jsbind-codegen) → frontend/backend/
//! ```
//!
//! The types are designed to be:
//! - Serializable, so the same shape feeds descriptor files and template contexts
//! - Immutable once built (the generator never mutates a tree)
//! - Free of any target-language concerns

mod package;
mod types;
mod validate;

pub use package::{Method, Package, Parameter, Struct};
pub use types::{ParamType, StructShape};
pub use validate::{Issue, validate};
