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
pub struct GenerateCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Template directory (overrides jsbind.toml and installed templates)
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Worker threads used to render structs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let project = Project::load(&self.project);
        let packages = project.packages()?;

        let mut options = project.options();
        if let Some(dir) = &self.templates {
            options = options.templates(TemplateSources::from_dir(dir));
        }
        if let Some(jobs) = self.jobs {
            options = options.jobs(jobs);
        }

        let report = ops::generate(
            &packages,
            options,
            ops::generate::GenerateOptions {
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
