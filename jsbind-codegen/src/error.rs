//! Error taxonomy for binding generation.

use std::{fmt, path::Path};

use jsbind_core::FsError;
use jsbind_ir::Issue;
use thiserror::Error;

use crate::{
    layout::LayoutError,
    template::{TemplateError, TemplateTarget},
};

/// Boxed error returned by descriptor sources.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure in one component of the generator.
#[derive(Debug, Error)]
pub enum Error {
    /// The descriptor source failed (I/O, parse).
    #[error("descriptor source failed")]
    Acquisition {
        #[source]
        source: BoxError,
    },

    /// The descriptor tree cannot be laid out on disk.
    #[error("invalid descriptor tree: {}", join_issues(.issues))]
    InvalidDescriptors { issues: Vec<Issue> },

    /// The output layout would escape its own directory.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// A template could not be read or parsed.
    #[error("failed to load {target} template from {origin}")]
    TemplateLoad {
        target: TemplateTarget,
        origin: String,
        #[source]
        source: TemplateError,
    },

    /// A template rejected its context.
    #[error("failed to render {target} for {unit}")]
    Render {
        target: TemplateTarget,
        /// `package.Struct`, or `index` for the aggregate file.
        unit: String,
        #[source]
        source: TemplateError,
    },

    /// Directory creation, write or rename failure.
    #[error(transparent)]
    Filesystem(#[from] FsError),
}

impl Error {
    /// The `package.Struct` (or `index`) a render failure belongs to.
    pub fn unit(&self) -> Option<&str> {
        match self {
            Error::Render { unit, .. } => Some(unit),
            _ => None,
        }
    }

    /// The filesystem path involved in the failure, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Filesystem(e) => Some(&e.path),
            _ => None,
        }
    }

    /// Report a filesystem failure under `to` instead of `from`.
    pub(crate) fn relocate(self, from: &Path, to: &Path) -> Self {
        match self {
            Error::Filesystem(e) => Error::Filesystem(e.relocate(from, to)),
            other => other,
        }
    }
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Pipeline stage, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Acquire,
    Validate,
    Templates,
    Prepare,
    Index,
    Packages,
    Publish,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Stage::Acquire => "error acquiring descriptors",
            Stage::Validate => "error validating descriptors",
            Stage::Templates => "error loading templates",
            Stage::Prepare => "error preparing output directory",
            Stage::Index => "error generating index file",
            Stage::Packages => "error generating packages",
            Stage::Publish => "error publishing generated files",
        };
        f.write_str(message)
    }
}

/// A pipeline failure: the stage that failed and its underlying cause.
#[derive(Debug, Error)]
#[error("{stage}")]
pub struct PipelineError {
    stage: Stage,
    #[source]
    source: Error,
}

impl PipelineError {
    pub fn new(stage: Stage, source: impl Into<Error>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The underlying cause.
    pub fn cause(&self) -> &Error {
        &self.source
    }

    pub fn into_cause(self) -> Error {
        self.source
    }
}

/// Attach a stage to a component error.
pub(crate) fn at<E: Into<Error>>(stage: Stage) -> impl FnOnce(E) -> PipelineError {
    move |e| PipelineError::new(stage, e)
}
