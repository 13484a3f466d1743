use clap::Args;
use eyre::Result;

use crate::project::{Project, ProjectArgs};

#[derive(Args, Debug)]
pub struct ListCommand {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let project = Project::load(&self.project);
        let packages = project.packages()?;

        if packages.is_empty() {
            println!("No packages defined");
            return Ok(());
        }

        for package in &packages {
            println!("{}", package.name);
            for comment in &package.comments {
                println!("  // {}", comment);
            }
            for strct in &package.structs {
                println!("  {}", strct.name);
                for method in &strct.methods {
                    println!("    {}", method.signature());
                }
            }
        }

        Ok(())
    }
}
