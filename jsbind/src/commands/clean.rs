use clap::Args;
use eyre::Result;

use crate::{
    ops,
    project::{Project, ProjectArgs},
    reports::{Report, TerminalOutput},
};

#[derive(Args, Debug)]
pub struct CleanCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Preview what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let project = Project::load(&self.project);

        let report = ops::clean(
            &project.options(),
            ops::clean::CleanOptions {
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
