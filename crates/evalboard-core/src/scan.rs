//! Directory scanning for result documents
//!
//! Layout: `<model>/<benchmark>/<shot>-shot/**/results_*.json`. When several
//! documents exist for one unit, the one with the greatest file name (the
//! newest harness timestamp) is used.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::catalog::DiscoveredMetrics;
use crate::config::{BenchmarkSetup, DashboardSetup};
use crate::document::ResultDocument;
use crate::error::{BoardError, BoardResult};
use crate::metrics::{MetricsCollector, ModelScores, summarize};

/// A unit whose result document could not be read
#[derive(Debug, Clone, PartialEq)]
pub struct UnitFailure {
    pub benchmark: String,
    pub shot: String,
    pub path: PathBuf,
    pub message: String,
}

/// Everything aggregated for one model or checkpoint directory
#[derive(Debug, Clone, Default)]
pub struct ModelScan {
    pub scores: ModelScores,
    pub discovered: DiscoveredMetrics,
    pub failures: Vec<UnitFailure>,
}

/// All `results_*.json` files below a directory
pub fn find_results_files(dir: impl AsRef<Path>) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_results_file(e.path()))
        .map(|e| e.into_path())
        .collect()
}

/// The results file with the greatest file name below a directory
pub fn latest_results_file(dir: impl AsRef<Path>) -> Option<PathBuf> {
    find_results_files(dir)
        .into_iter()
        .max_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)))
}

fn is_results_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("results_") && n.ends_with(".json"))
}

/// Read and parse one result document
pub fn load_document(path: impl AsRef<Path>) -> BoardResult<ResultDocument> {
    ResultDocument::from_file(path)
}

/// Sorted names and paths of the sub-directories of `dir`
pub fn list_model_dirs(dir: impl AsRef<Path>) -> BoardResult<Vec<(String, PathBuf)>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| BoardError::io(dir, e))?;

    let mut models = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BoardError::io(dir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            models.push((name.to_string(), path));
        }
    }
    models.sort();
    Ok(models)
}

/// Training step encoded as the last `-`-separated segment of a directory name
pub fn checkpoint_step(dir_name: &str) -> Option<u64> {
    let step = dir_name.rsplit('-').next()?;
    if step.is_empty() || !step.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    step.parse().ok()
}

/// Checkpoint directories ordered by step; others are skipped
pub fn list_checkpoints(dir: impl AsRef<Path>) -> BoardResult<Vec<(u64, String, PathBuf)>> {
    let mut checkpoints: Vec<_> = list_model_dirs(dir)?
        .into_iter()
        .filter_map(|(name, path)| checkpoint_step(&name).map(|step| (step, name, path)))
        .collect();
    checkpoints.sort();
    Ok(checkpoints)
}

/// Aggregates every configured (benchmark, shot) of a model directory
pub struct ModelScanner<'a> {
    benchmarks: &'a BenchmarkSetup,
    dashboard: &'a DashboardSetup,
}

impl<'a> ModelScanner<'a> {
    pub fn new(benchmarks: &'a BenchmarkSetup, dashboard: &'a DashboardSetup) -> Self {
        Self {
            benchmarks,
            dashboard,
        }
    }

    /// Scan one model directory.
    ///
    /// Missing directories and files are skipped; unreadable documents are
    /// reported in [`ModelScan::failures`] and contribute no scores.
    pub fn scan(&self, model_dir: impl AsRef<Path>) -> ModelScan {
        let model_dir = model_dir.as_ref();
        let mut scan = ModelScan::default();

        for (benchmark, config) in self.benchmarks.iter() {
            let exclusions = config.exclusions(&self.dashboard.excluded_metrics);
            let collector = MetricsCollector::for_benchmark(benchmark, config, exclusions);

            for shot in &self.dashboard.shots {
                let shot_dir = model_dir
                    .join(benchmark)
                    .join(DashboardSetup::shot_dir_name(shot));
                if !shot_dir.is_dir() {
                    continue;
                }
                let Some(results_file) = latest_results_file(&shot_dir) else {
                    tracing::debug!("No results file in {:?}", shot_dir);
                    continue;
                };

                let doc = match load_document(&results_file) {
                    Ok(doc) => doc,
                    Err(e) => {
                        tracing::warn!("Failed to load {:?}: {}", results_file, e);
                        scan.failures.push(UnitFailure {
                            benchmark: benchmark.clone(),
                            shot: shot.clone(),
                            path: results_file,
                            message: e.to_string(),
                        });
                        continue;
                    }
                };

                let Some(observations) = collector.collect(&doc) else {
                    tracing::debug!(benchmark = %benchmark, shot = %shot, "no metrics found");
                    continue;
                };
                let summaries = summarize(&observations);
                scan.discovered.record(benchmark, &summaries);
                scan.scores
                    .entry(benchmark.clone())
                    .or_default()
                    .insert(shot.clone(), summaries);
            }
        }

        tracing::info!(
            "Scanned {:?}: {} benchmarks, {} failed units",
            model_dir,
            scan.scores.len(),
            scan.failures.len()
        );
        scan
    }
}
