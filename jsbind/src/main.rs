mod commands;
mod ops;
mod project;
mod reports;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Cli;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "JSBIND_LOG";

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.run()
}

/// Log to stderr. `JSBIND_LOG` wins over the verbosity flags.
fn init_tracing(verbose: u8) {
    let directive = match std::env::var(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,jsbind=info,jsbind_codegen=info".to_string(),
            2 => "info,jsbind=debug,jsbind_codegen=debug,jsbind_core=debug".to_string(),
            _ => "debug,jsbind_codegen=trace,jsbind_core=trace".to_string(),
        },
    };
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
