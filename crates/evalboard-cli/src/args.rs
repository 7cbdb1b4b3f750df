//! CLI argument definitions using clap

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use evalboard_core::BoardConfig;

#[derive(Parser, Debug)]
#[command(name = "evalboard")]
#[command(about = "Aggregate evaluation results into a dashboard data file")]
#[command(version)]
pub struct Cli {
    /// Directory the default paths are resolved against
    #[arg(long, env = "EVALBOARD_ROOT", default_value = ".", global = true)]
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate all results and write the dashboard JSON
    Build {
        /// Output file (default: docs/data.json)
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[command(flatten)]
        paths: PathArgs,

        /// Skip unreadable result documents instead of failing
        #[arg(long)]
        keep_going: bool,
    },

    /// List missing benchmarks, shots, main metrics and subtasks
    Check {
        #[command(flatten)]
        paths: PathArgs,
    },
}

/// Input locations shared by every command; relative paths hang off `--root`
#[derive(Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// Directory with one sub-directory per model
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Directory with one sub-directory per training checkpoint
    #[arg(long)]
    pub progress_dir: Option<PathBuf>,

    /// Benchmark configuration
    #[arg(long)]
    pub metrics_setup: Option<PathBuf>,

    /// Model metadata
    #[arg(long)]
    pub models_setup: Option<PathBuf>,

    /// Shots, exclusions and grouping (optional file)
    #[arg(long)]
    pub dashboard_setup: Option<PathBuf>,
}

impl PathArgs {
    pub fn to_config(&self, root: &Path, output: Option<&Path>) -> BoardConfig {
        let mut config = BoardConfig::new(root);
        if let Some(dir) = &self.results_dir {
            config = config.with_results_dir(dir);
        }
        if let Some(dir) = &self.progress_dir {
            config = config.with_progress_dir(dir);
        }
        if let Some(file) = &self.metrics_setup {
            config = config.with_metrics_setup(file);
        }
        if let Some(file) = &self.models_setup {
            config = config.with_models_setup(file);
        }
        if let Some(file) = &self.dashboard_setup {
            config = config.with_dashboard_setup(file);
        }
        if let Some(file) = output {
            config = config.with_output_file(file);
        }
        config
    }
}
