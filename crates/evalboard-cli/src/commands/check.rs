//! Audit the results tree for missing data

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use evalboard_core::audit::{AuditReport, DirAudit};
use evalboard_core::{Auditor, BoardConfig};

use crate::console::CliConsole;

/// Print the audit; returns whether everything was present
pub async fn run(config: BoardConfig, verbose: bool) -> Result<bool> {
    let console = CliConsole::new(verbose);
    let (benchmarks, dashboard) = super::load_setups(&config)?;

    let results_dir = config.results_dir.clone();
    let progress_dir = config.progress_dir.clone();
    let report = tokio::task::spawn_blocking(move || {
        Auditor::new(&benchmarks, &dashboard).run(&results_dir, &progress_dir)
    })
    .await
    .context("Audit task failed")?
    .context("Failed to audit results")?;

    print_report(&console, &report, &config.results_dir, &config.progress_dir);

    let complete = report.is_complete();
    if complete {
        console.success("All results present");
    } else {
        console.error("Results are incomplete");
    }
    Ok(complete)
}

fn print_report(console: &CliConsole, report: &AuditReport, results_dir: &Path, progress_dir: &Path) {
    console.print_header("Models");
    match &report.models {
        Some(audits) => print_dirs(console, audits),
        None => console.warn(&format!("Results directory not found: {}", results_dir.display())),
    }

    console.print_header("Checkpoints");
    match &report.checkpoints {
        Some(audits) => print_dirs(console, audits),
        None => console.warn(&format!("Progress directory not found: {}", progress_dir.display())),
    }

    console.print_header("Main metrics and subtasks");
    if report.integrity.is_empty() {
        console.success("No issues");
    }
    for issue in &report.integrity {
        console.print_item(&format!(
            "{} / {} / {} / {}: {}",
            issue.model.bold(),
            issue.benchmark,
            issue.shot,
            issue.task,
            issue.reason.red()
        ));
    }
}

fn print_dirs(console: &CliConsole, audits: &[DirAudit]) {
    if audits.is_empty() {
        console.info("No directories");
    }
    for audit in audits {
        if audit.missing.is_empty() {
            console.success(&format!("{}: complete", audit.name));
            continue;
        }
        println!(
            "{} {} ({} missing)",
            "✗".red().bold(),
            audit.name.bold(),
            audit.missing.len()
        );
        for unit in &audit.missing {
            console.print_item(&format!(
                "{} {}: {}",
                unit.benchmark,
                unit.shot.dimmed(),
                unit.reason.to_string().red()
            ));
        }
    }
}
