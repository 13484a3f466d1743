//! Template source locators.

use std::{
    borrow::Cow,
    io,
    path::{Path, PathBuf},
};

use super::TemplateTarget;

/// Directory name, next to the installed executable, holding templates.
const INSTALLED_DIR: &str = "templates";

const BUILTIN_INDEX: &str = include_str!("../../templates/index.js.tera");
const BUILTIN_IMPLEMENTATION: &str = include_str!("../../templates/package.js.tera");
const BUILTIN_DECLARATION: &str = include_str!("../../templates/package.d.ts.tera");

/// Where one template's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A template file on disk.
    File(PathBuf),
    /// Template text compiled into the binary.
    Builtin(&'static str),
    /// Template text supplied by the caller.
    Inline(String),
}

impl TemplateSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        TemplateSource::File(path.into())
    }

    pub fn inline(text: impl Into<String>) -> Self {
        TemplateSource::Inline(text.into())
    }

    /// Description of the source for error messages.
    pub fn origin(&self) -> String {
        match self {
            TemplateSource::File(path) => format!("'{}'", path.display()),
            TemplateSource::Builtin(_) => "<builtin>".to_string(),
            TemplateSource::Inline(_) => "<inline>".to_string(),
        }
    }

    /// Read the template text.
    pub fn read(&self) -> io::Result<Cow<'_, str>> {
        match self {
            TemplateSource::File(path) => std::fs::read_to_string(path).map(Cow::Owned),
            TemplateSource::Builtin(text) => Ok(Cow::Borrowed(text)),
            TemplateSource::Inline(text) => Ok(Cow::Borrowed(text.as_str())),
        }
    }
}

/// Sources for the index, implementation and declaration templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSources {
    pub index: TemplateSource,
    pub implementation: TemplateSource,
    pub declaration: TemplateSource,
}

impl TemplateSources {
    /// The default templates shipped with jsbind.
    pub fn builtin() -> Self {
        Self {
            index: TemplateSource::Builtin(BUILTIN_INDEX),
            implementation: TemplateSource::Builtin(BUILTIN_IMPLEMENTATION),
            declaration: TemplateSource::Builtin(BUILTIN_DECLARATION),
        }
    }

    /// Templates read from `dir`, using the standard file names.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let file = |target: TemplateTarget| TemplateSource::file(dir.join(target.file_name()));
        Self {
            index: file(TemplateTarget::Index),
            implementation: file(TemplateTarget::Implementation),
            declaration: file(TemplateTarget::Declaration),
        }
    }

    /// Templates installed next to the running executable
    /// (`<exe dir>/templates`), or the builtin set when there is no such
    /// directory.
    ///
    /// The caller's working directory is never consulted.
    pub fn installed() -> Self {
        match installed_dir() {
            Some(dir) => {
                tracing::debug!(dir = %dir.display(), "using installed templates");
                Self::from_dir(dir)
            }
            None => Self::builtin(),
        }
    }

    /// Replace the source for one target.
    pub fn with(mut self, target: TemplateTarget, source: TemplateSource) -> Self {
        match target {
            TemplateTarget::Index => self.index = source,
            TemplateTarget::Implementation => self.implementation = source,
            TemplateTarget::Declaration => self.declaration = source,
        }
        self
    }

    pub fn get(&self, target: TemplateTarget) -> &TemplateSource {
        match target {
            TemplateTarget::Index => &self.index,
            TemplateTarget::Implementation => &self.implementation,
            TemplateTarget::Declaration => &self.declaration,
        }
    }
}

impl Default for TemplateSources {
    fn default() -> Self {
        Self::builtin()
    }
}

fn installed_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?.join(INSTALLED_DIR);
    dir.is_dir().then_some(dir)
}
