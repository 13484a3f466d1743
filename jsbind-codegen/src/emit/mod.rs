//! Emitters that render descriptor trees and write the results below an
//! output root.
//!
//! - [`index`] - the aggregate index over every package
//! - [`package`] - one directory per package, one file pair per struct

pub mod index;
pub mod package;

pub use index::{IndexContext, emit_index, render_index};
pub use package::{emit_packages, render_packages};
