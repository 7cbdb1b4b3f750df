//! Missing-results audit
//!
//! Walks the same layout as the report builder and lists what is absent:
//! benchmark or shot directories without results, and result documents
//! lacking the configured main metric or a declared subtask.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{BenchmarkSetup, DashboardSetup};
use crate::document::{self, ResultDocument, TaskKeyMatch};
use crate::error::BoardResult;
use crate::scan::{checkpoint_step, find_results_files, latest_results_file, list_model_dirs};

/// Why a unit counts as missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    BenchmarkDirMissing,
    ShotDirMissing,
    NoResultsFile,
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MissingReason::BenchmarkDirMissing => "benchmark directory missing",
            MissingReason::ShotDirMissing => "shot directory missing",
            MissingReason::NoResultsFile => "no results JSON found",
        };
        f.write_str(text)
    }
}

/// A benchmark or shot without results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingUnit {
    pub benchmark: String,
    /// Shot directory name, or `ALL` when the benchmark directory is absent
    pub shot: String,
    pub reason: MissingReason,
}

/// A result document that lacks expected content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityIssue {
    pub model: String,
    pub benchmark: String,
    pub shot: String,
    /// Task key, or the document path when it could not be read
    pub task: String,
    pub reason: String,
}

/// Missing units of one model or checkpoint directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirAudit {
    pub name: String,
    pub missing: Vec<MissingUnit>,
}

/// Full audit outcome
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    /// `None` when the results directory does not exist
    pub models: Option<Vec<DirAudit>>,
    /// `None` when the progress directory does not exist
    pub checkpoints: Option<Vec<DirAudit>>,
    pub integrity: Vec<IntegrityIssue>,
}

impl AuditReport {
    pub fn is_complete(&self) -> bool {
        let dirs_ok = |dirs: &Option<Vec<DirAudit>>| {
            dirs.as_ref()
                .is_none_or(|d| d.iter().all(|a| a.missing.is_empty()))
        };
        dirs_ok(&self.models) && dirs_ok(&self.checkpoints) && self.integrity.is_empty()
    }
}

/// List every missing benchmark/shot of one model directory
pub fn check_model_dir<'a>(
    model_dir: &Path,
    benchmarks: impl IntoIterator<Item = &'a String>,
    shots: &[String],
) -> Vec<MissingUnit> {
    let mut missing = Vec::new();

    for benchmark in benchmarks {
        let bench_dir = model_dir.join(benchmark);
        if !bench_dir.is_dir() {
            missing.push(MissingUnit {
                benchmark: benchmark.clone(),
                shot: "ALL".to_string(),
                reason: MissingReason::BenchmarkDirMissing,
            });
            continue;
        }
        for shot in shots {
            let shot_name = DashboardSetup::shot_dir_name(shot);
            let shot_dir = bench_dir.join(&shot_name);
            let reason = if !shot_dir.is_dir() {
                MissingReason::ShotDirMissing
            } else if find_results_files(&shot_dir).is_empty() {
                MissingReason::NoResultsFile
            } else {
                continue;
            };
            missing.push(MissingUnit {
                benchmark: benchmark.clone(),
                shot: shot_name,
                reason,
            });
        }
    }

    missing
}

/// Check the latest document of every present unit for its main metric
/// and declared subtasks
pub fn check_main_metrics(
    base_dirs: &[PathBuf],
    benchmarks: &BenchmarkSetup,
    shots: &[String],
) -> BoardResult<Vec<IntegrityIssue>> {
    let mut issues = Vec::new();

    for base_dir in base_dirs {
        if !base_dir.is_dir() {
            continue;
        }
        for (model, model_dir) in list_model_dirs(base_dir)? {
            for (benchmark, config) in benchmarks.iter() {
                let bench_dir = model_dir.join(benchmark);
                if !bench_dir.is_dir() {
                    continue;
                }
                let metric_key = document::value_key(&config.main_metric);

                for shot in shots {
                    let shot_name = DashboardSetup::shot_dir_name(shot);
                    let Some(results_file) = latest_results_file(bench_dir.join(&shot_name))
                    else {
                        continue;
                    };
                    let issue = |task: String, reason: String| IntegrityIssue {
                        model: model.clone(),
                        benchmark: benchmark.clone(),
                        shot: shot_name.clone(),
                        task,
                        reason,
                    };

                    let doc = match ResultDocument::from_file(&results_file) {
                        Ok(doc) => doc,
                        Err(e) => {
                            issues.push(issue(
                                results_file.display().to_string(),
                                format!("error reading JSON: {}", e),
                            ));
                            continue;
                        }
                    };

                    for (task_key, task_metrics) in doc.tasks() {
                        if !task_metrics.contains_key(&metric_key) {
                            issues.push(issue(task_key.clone(), format!("missing {}", metric_key)));
                        }
                    }
                    if let Some(subtasks) = config.subtasks() {
                        for code in subtasks.keys() {
                            let key = TaskKeyMatch::subtask_key(benchmark, code);
                            if !doc.results.contains_key(&key) {
                                issues.push(issue(key, "missing subtask entry".to_string()));
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(issues)
}

/// Runs the whole audit over the results and progress directories
pub struct Auditor<'a> {
    benchmarks: &'a BenchmarkSetup,
    dashboard: &'a DashboardSetup,
}

impl<'a> Auditor<'a> {
    pub fn new(benchmarks: &'a BenchmarkSetup, dashboard: &'a DashboardSetup) -> Self {
        Self {
            benchmarks,
            dashboard,
        }
    }

    pub fn run(&self, results_dir: &Path, progress_dir: &Path) -> BoardResult<AuditReport> {
        let mut names: Vec<&String> = self.benchmarks.names().collect();
        names.sort();

        let models = if results_dir.is_dir() {
            let audits = list_model_dirs(results_dir)?
                .into_iter()
                .map(|(name, path)| self.audit_dir(name, &path, &names))
                .collect();
            Some(audits)
        } else {
            None
        };

        let checkpoints = if progress_dir.is_dir() {
            let mut dirs = list_model_dirs(progress_dir)?;
            dirs.sort_by_key(|(name, _)| checkpoint_step(name).unwrap_or(0));
            let audits = dirs
                .into_iter()
                .map(|(name, path)| self.audit_dir(name, &path, &names))
                .collect();
            Some(audits)
        } else {
            None
        };

        let integrity = check_main_metrics(
            &[results_dir.to_path_buf(), progress_dir.to_path_buf()],
            self.benchmarks,
            &self.dashboard.shots,
        )?;

        Ok(AuditReport {
            models,
            checkpoints,
            integrity,
        })
    }

    fn audit_dir(&self, name: String, path: &Path, benchmarks: &[&String]) -> DirAudit {
        let missing = check_model_dir(path, benchmarks.iter().copied(), &self.dashboard.shots);
        tracing::debug!(dir = %name, missing = missing.len(), "audited");
        DirAudit { name, missing }
    }
}
