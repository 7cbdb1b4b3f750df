//! Build the dashboard data file

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use evalboard_core::scan::{list_checkpoints, list_model_dirs};
use evalboard_core::{
    BenchmarkSetup, BoardConfig, DashboardSetup, JsonReporter, ModelScan, ModelScanner,
    ModelsSetup, ReportBuilder,
};

use crate::console::CliConsole;

/// Scan every model and checkpoint, aggregate and write the report
pub async fn run(config: BoardConfig, keep_going: bool, verbose: bool) -> Result<()> {
    let console = CliConsole::new(verbose);

    let (benchmarks, dashboard) = super::load_setups(&config)?;
    let models_setup = ModelsSetup::from_yaml_file(&config.models_setup)
        .with_context(|| format!("Failed to load {}", config.models_setup.display()))?;
    let benchmarks = Arc::new(benchmarks);
    let dashboard = Arc::new(dashboard);

    let model_dirs = if config.results_dir.is_dir() {
        list_model_dirs(&config.results_dir)?
    } else {
        console.warn(&format!(
            "Results directory not found: {}",
            config.results_dir.display()
        ));
        Vec::new()
    };
    let checkpoints = if config.progress_dir.is_dir() {
        list_checkpoints(&config.progress_dir)?
    } else {
        console.info(&format!(
            "No progress directory at {}",
            config.progress_dir.display()
        ));
        Vec::new()
    };

    console.info(&format!(
        "Scanning {} models and {} checkpoints",
        model_dirs.len(),
        checkpoints.len()
    ));

    let model_paths = model_dirs.iter().map(|(_, path)| path.clone()).collect();
    let model_scans = scan_all(&benchmarks, &dashboard, model_paths).await?;
    let checkpoint_paths = checkpoints.iter().map(|(_, _, path)| path.clone()).collect();
    let checkpoint_scans = scan_all(&benchmarks, &dashboard, checkpoint_paths).await?;

    // Fold in directory order so the output does not depend on scheduling
    let mut builder = ReportBuilder::new(&benchmarks, &models_setup, &dashboard);
    for ((name, _), scan) in model_dirs.into_iter().zip(model_scans) {
        builder.add_model(name, scan);
    }
    for ((step, name, _), scan) in checkpoints.into_iter().zip(checkpoint_scans) {
        builder.add_checkpoint(step, &name, scan);
    }

    let failures = builder.failures();
    for sourced in failures {
        let failure = &sourced.failure;
        tracing::warn!(
            "{}: {} {}-shot skipped ({}): {}",
            sourced.source,
            failure.benchmark,
            failure.shot,
            failure.path.display(),
            failure.message
        );
    }
    if !failures.is_empty() && !keep_going {
        bail!(
            "{} result documents could not be read; pass --keep-going to skip them",
            failures.len()
        );
    }
    let skipped = failures.len();

    let report = builder.build();
    let bytes = JsonReporter::write(&report, &config.output_file)
        .with_context(|| format!("Failed to write {}", config.output_file.display()))?;

    console.success(&format!(
        "Generated {} ({:.1} KB)",
        config.output_file.display(),
        bytes as f64 / 1024.0
    ));
    console.print_field("Models", report.models.len());
    console.print_field("Checkpoints", report.progress.len());
    console.print_field("Benchmarks", report.metrics_setup.len());
    console.info(&format!("Models: {}", report.model_names().join(", ")));
    let steps = report.checkpoint_steps();
    if let (Some(first), Some(last)) = (steps.first(), steps.last()) {
        console.info(&format!("Checkpoint steps: {} to {}", first, last));
    }
    if skipped > 0 {
        console.warn(&format!("{} units skipped", skipped));
    }

    Ok(())
}

/// Scan directories on the blocking pool; results keep the input order
async fn scan_all(
    benchmarks: &Arc<BenchmarkSetup>,
    dashboard: &Arc<DashboardSetup>,
    dirs: Vec<PathBuf>,
) -> Result<Vec<ModelScan>> {
    let handles: Vec<_> = dirs
        .into_iter()
        .map(|dir| {
            let benchmarks = Arc::clone(benchmarks);
            let dashboard = Arc::clone(dashboard);
            tokio::task::spawn_blocking(move || {
                ModelScanner::new(&benchmarks, &dashboard).scan(&dir)
            })
        })
        .collect();

    let mut scans = Vec::with_capacity(handles.len());
    for handle in handles {
        scans.push(handle.await.context("Scan task failed")?);
    }
    Ok(scans)
}
