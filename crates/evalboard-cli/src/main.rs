//! Evalboard CLI
//!
//! Builds the dashboard data file from evaluation results and audits the
//! results tree for gaps.
//!
//! ```bash
//! evalboard build                      # write docs/data.json
//! evalboard --root /data/noreval check # list missing results
//! ```

mod args;
mod commands;
mod console;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise info, or debug with --verbose
    let fallback = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build {
            output,
            paths,
            keep_going,
        } => {
            let config = paths.to_config(&cli.root, output.as_deref());
            commands::build::run(config, keep_going, cli.verbose).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { paths } => {
            let config = paths.to_config(&cli.root, None);
            let complete = commands::check::run(config, cli.verbose).await?;
            Ok(if complete {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
