//! Template engine adapter.
//!
//! Rendering is an injected capability: a [`TemplateEngine`] turns template
//! text into a reusable [`Renderer`], and a renderer turns a JSON context
//! into bytes. [`TeraEngine`] is the default engine.
//!
//! Three templates are loaded once per run, one per [`TemplateTarget`], and
//! shared across every struct.

mod source;
mod tera;

use std::fmt;

use thiserror::Error;

pub use self::tera::TeraEngine;
pub use source::{TemplateSource, TemplateSources};
use crate::{Error, error::BoxError};

/// An error raised by a template engine while loading or rendering.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct TemplateError(BoxError);

impl TemplateError {
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self(error.into())
    }
}

/// A template engine that can compile template text.
pub trait TemplateEngine: Send + Sync {
    /// Engine name (for logging).
    fn name(&self) -> &'static str;

    /// Compile `text` into a renderer. `name` identifies the template in
    /// engine error messages.
    fn load(&self, name: &str, text: &str) -> Result<Box<dyn Renderer>, TemplateError>;
}

/// A compiled template. Rendering must be pure: the same context always
/// yields the same bytes.
pub trait Renderer: Send + Sync {
    fn render(&self, context: &serde_json::Value) -> Result<Vec<u8>, TemplateError>;
}

/// The kind of output a template produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateTarget {
    /// Aggregate index over all packages.
    Index,
    /// Per-struct runtime implementation.
    Implementation,
    /// Per-struct type declarations.
    Declaration,
}

impl TemplateTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateTarget::Index => "index",
            TemplateTarget::Implementation => "implementation",
            TemplateTarget::Declaration => "declaration",
        }
    }

    /// File name of this template inside a template directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateTarget::Index => "index.js.tera",
            TemplateTarget::Implementation => "package.js.tera",
            TemplateTarget::Declaration => "package.d.ts.tera",
        }
    }
}

impl fmt::Display for TemplateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three loaded renderers for a run.
pub struct Templates {
    index: Box<dyn Renderer>,
    implementation: Box<dyn Renderer>,
    declaration: Box<dyn Renderer>,
}

impl Templates {
    /// Read and compile all three templates.
    ///
    /// Fails on the first source that cannot be read or parsed.
    pub fn load(engine: &dyn TemplateEngine, sources: &TemplateSources) -> Result<Self, Error> {
        let load = |target: TemplateTarget| -> Result<Box<dyn Renderer>, Error> {
            let source = sources.get(target);
            let load_error = |e: TemplateError| Error::TemplateLoad {
                target,
                origin: source.origin(),
                source: e,
            };

            let text = source.read().map_err(|e| load_error(TemplateError::new(e)))?;
            let renderer = engine.load(target.as_str(), &text).map_err(load_error)?;
            tracing::debug!(%target, origin = %source.origin(), engine = engine.name(), "template loaded");
            Ok(renderer)
        };

        Ok(Self {
            index: load(TemplateTarget::Index)?,
            implementation: load(TemplateTarget::Implementation)?,
            declaration: load(TemplateTarget::Declaration)?,
        })
    }

    /// Render one target with the given context.
    pub fn render(
        &self,
        target: TemplateTarget,
        context: &serde_json::Value,
    ) -> Result<Vec<u8>, TemplateError> {
        let renderer = match target {
            TemplateTarget::Index => &self.index,
            TemplateTarget::Implementation => &self.implementation,
            TemplateTarget::Declaration => &self.declaration,
        };
        renderer.render(context)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_target_names() {
        assert_eq!(TemplateTarget::Index.to_string(), "index");
        assert_eq!(TemplateTarget::Declaration.file_name(), "package.d.ts.tera");
    }

    #[test]
    fn test_load_builtin_and_render() {
        let templates = Templates::load(&TeraEngine, &TemplateSources::builtin()).unwrap();
        let out = templates
            .render(TemplateTarget::Index, &json!({ "packages": [] }))
            .unwrap();

        assert!(String::from_utf8(out).unwrap().contains("export default"));
    }

    #[test]
    fn test_load_reports_target_and_origin() {
        let sources = TemplateSources::builtin()
            .with(TemplateTarget::Declaration, TemplateSource::inline("{% if %}"));

        let err = Templates::load(&TeraEngine, &sources).err().unwrap();

        match err {
            Error::TemplateLoad { target, origin, .. } => {
                assert_eq!(target, TemplateTarget::Declaration);
                assert_eq!(origin, "<inline>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
