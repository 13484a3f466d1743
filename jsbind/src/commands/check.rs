use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use jsbind_codegen::TemplateSources;

use crate::{
    ops,
    project::{Project, ProjectArgs},
    reports::{Report, TerminalOutput},
};

#[derive(Args, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Template directory (overrides jsbind.toml and installed templates)
    #[arg(short, long)]
    pub templates: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let project = Project::load(&self.project);
        let descriptors = project.descriptors_path()?.to_path_buf();
        let packages = project.packages()?;

        let mut options = project.options();
        if let Some(dir) = &self.templates {
            options = options.templates(TemplateSources::from_dir(dir));
        }

        let report = ops::check(&packages, descriptors, options);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
