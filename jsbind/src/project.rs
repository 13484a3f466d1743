//! Resolving a project from command-line arguments.

use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Result, eyre};
use jsbind_codegen::GeneratorOptions;
use jsbind_ir::Package;
use jsbind_manifest::{CONFIG_FILE, Config, DescriptorFile};

use crate::commands::UnwrapOrExit;

/// Arguments shared by every command that works on a project.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root; output paths resolve against it (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Path to jsbind.toml (defaults to <root>/jsbind.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Descriptor file, JSON or TOML (overrides jsbind.toml)
    #[arg(short, long)]
    pub descriptors: Option<PathBuf>,
}

/// A project root with its configuration.
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    descriptors: Option<PathBuf>,
}

impl Project {
    /// Load `jsbind.toml` (if present) and apply argument overrides.
    ///
    /// Configuration errors are printed with their source span and exit
    /// the process.
    pub fn load(args: &ProjectArgs) -> Self {
        let config_path = args
            .config
            .clone()
            .unwrap_or_else(|| args.root.join(CONFIG_FILE));
        let config = Config::open_or_default(&config_path).unwrap_or_exit();

        let descriptors = args
            .descriptors
            .clone()
            .or_else(|| config.descriptors.as_ref().map(|p| args.root.join(p)));

        Self {
            root: args.root.clone(),
            config,
            descriptors,
        }
    }

    /// Path of the descriptor file.
    pub fn descriptors_path(&self) -> Result<&Path> {
        self.descriptors.as_deref().ok_or_else(|| {
            eyre!("no descriptor file: pass --descriptors or set `descriptors` in {CONFIG_FILE}")
        })
    }

    /// Read the descriptor tree. Parse errors exit the process.
    pub fn packages(&self) -> Result<Vec<Package>> {
        let path = self.descriptors_path()?;
        tracing::debug!(path = %path.display(), "reading descriptors");
        Ok(DescriptorFile::open(path).unwrap_or_exit().into_packages())
    }

    /// Generator options from the configuration.
    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions::from_config(&self.root, &self.config)
    }
}
