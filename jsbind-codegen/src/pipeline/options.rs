//! Pipeline options.

use std::path::{Path, PathBuf};

use jsbind_core::PublishMode;
use jsbind_manifest::Config;

use crate::{layout::OutputLayout, template::TemplateSources};

/// Everything a run needs besides the descriptors and the template engine.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Directory the output layout is resolved against. The process working
    /// directory is never consulted.
    pub project_root: PathBuf,
    pub layout: OutputLayout,
    pub templates: TemplateSources,
    pub publish: PublishMode,
    /// Worker threads for struct rendering; `0` and `1` both mean sequential.
    pub jobs: usize,
}

impl GeneratorOptions {
    /// Default layout and builtin templates below `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            layout: OutputLayout::default(),
            templates: TemplateSources::builtin(),
            publish: PublishMode::default(),
            jobs: 1,
        }
    }

    /// Options described by a `jsbind.toml`.
    ///
    /// Without a configured template directory, templates installed next
    /// to the executable are used, falling back to the builtin set.
    pub fn from_config(project_root: impl Into<PathBuf>, config: &Config) -> Self {
        let project_root = project_root.into();
        let templates = match &config.templates.dir {
            Some(dir) => TemplateSources::from_dir(project_root.join(dir)),
            None => TemplateSources::installed(),
        };

        Self {
            layout: OutputLayout::from(&config.output),
            templates,
            publish: config.output.publish.into(),
            jobs: config.generate.jobs.unwrap_or(1),
            project_root,
        }
    }

    pub fn layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn templates(mut self, templates: TemplateSources) -> Self {
        self.templates = templates;
        self
    }

    pub fn publish(mut self, publish: PublishMode) -> Self {
        self.publish = publish;
        self
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Absolute (or project-relative) path of the output root.
    pub fn output_root(&self) -> PathBuf {
        self.layout.output_root(&self.project_root)
    }

    /// Path of an output-root-relative file, relative to the project root.
    pub(crate) fn project_path(&self, path: &Path) -> PathBuf {
        self.layout.dir.join(path)
    }
}
