//! Pipeline orchestrator.

use jsbind_core::Staging;
use jsbind_ir::Package;

use super::{GenerateReport, GeneratorOptions, PreviewFile};
use crate::{
    Error, PipelineError, Stage,
    emit::{emit_index, emit_packages, render_index, render_packages},
    error::at,
    source::DescriptorSource,
    template::{TemplateEngine, Templates, TeraEngine},
};

/// Generates bindings for a descriptor tree.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(GeneratorOptions::new(root)).with_engine(MyEngine);
/// let report = pipeline.run(&FileSource::new("bindings.json"))?;
/// ```
pub struct Pipeline {
    options: GeneratorOptions,
    engine: Box<dyn TemplateEngine>,
}

impl Pipeline {
    /// Create a pipeline using the Tera engine.
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            engine: Box::new(TeraEngine),
        }
    }

    /// Replace the template engine.
    pub fn with_engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Run a full generation and publish the result into the output root.
    ///
    /// # Errors
    ///
    /// Returns the first failure, tagged with its stage. On error nothing
    /// under the output root has changed.
    pub fn run<S>(&self, source: &S) -> Result<GenerateReport, PipelineError>
    where
        S: DescriptorSource + ?Sized,
    {
        let packages = self.acquire(source)?;
        let templates = self.load_templates()?;

        let layout = &self.options.layout;
        layout.validate().map_err(at(Stage::Prepare))?;
        let output_root = self.options.output_root();
        let staging = Staging::new(&output_root).map_err(at(Stage::Prepare))?;
        let root = staging.root();
        // Failures below name the output path, not the throwaway staging path.
        let located = |stage: Stage| {
            let (root, output_root) = (&root, &output_root);
            move |e: Error| PipelineError::new(stage, e.relocate(root, output_root))
        };

        tracing::info!(output = %output_root.display(), "generating index");
        let index =
            emit_index(&templates, layout, &packages, &root).map_err(located(Stage::Index))?;

        tracing::info!(packages = packages.len(), jobs = self.options.jobs, "generating packages");
        let units = emit_packages(&templates, layout, &packages, &root, self.options.jobs)
            .map_err(located(Stage::Packages))?;

        tracing::info!(mode = ?self.options.publish, "publishing");
        staging
            .publish(self.options.publish)
            .map_err(at(Stage::Publish))?;

        let files = std::iter::once(index)
            .chain(units)
            .map(|path| self.options.project_path(&path))
            .collect();

        Ok(GenerateReport {
            output_root,
            files,
            package_count: packages.len(),
            struct_count: packages.iter().map(|p| p.structs.len()).sum(),
        })
    }

    /// Render every file in memory without touching the filesystem.
    ///
    /// Runs the same stages as [`Pipeline::run`] up to rendering, so a
    /// successful preview means a run would only fail on I/O.
    pub fn preview<S>(&self, source: &S) -> Result<Vec<PreviewFile>, PipelineError>
    where
        S: DescriptorSource + ?Sized,
    {
        let packages = self.acquire(source)?;
        let templates = self.load_templates()?;
        let layout = &self.options.layout;
        layout.validate().map_err(at(Stage::Prepare))?;

        let index = render_index(&templates, layout, &packages).map_err(at(Stage::Index))?;
        let units =
            render_packages(&templates, layout, &packages).map_err(at(Stage::Packages))?;

        let files = std::iter::once(index)
            .chain(units.into_iter().flat_map(|unit| unit.into_files()))
            .map(|file| PreviewFile {
                path: self.options.project_path(file.path()),
                content: file.content_lossy(),
            })
            .collect();
        Ok(files)
    }

    fn acquire<S>(&self, source: &S) -> Result<Vec<Package>, PipelineError>
    where
        S: DescriptorSource + ?Sized,
    {
        let packages = source
            .acquire()
            .map_err(|source| PipelineError::new(Stage::Acquire, Error::Acquisition { source }))?;
        tracing::info!(packages = packages.len(), "descriptors acquired");

        let issues = jsbind_ir::validate(&packages);
        if !issues.is_empty() {
            return Err(PipelineError::new(
                Stage::Validate,
                Error::InvalidDescriptors { issues },
            ));
        }
        Ok(packages)
    }

    fn load_templates(&self) -> Result<Templates, PipelineError> {
        Templates::load(self.engine.as_ref(), &self.options.templates)
            .map_err(at(Stage::Templates))
    }
}
