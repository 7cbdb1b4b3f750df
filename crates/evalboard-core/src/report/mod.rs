//! Dashboard report assembly
//!
//! [`ReportBuilder`] folds model and checkpoint scans into one
//! [`DashboardReport`]; the discovered-metric accumulator travels with the
//! builder and is handed to the catalog builder only at the end.

mod json;

pub use json::JsonReporter;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::catalog::{CatalogEntry, DiscoveredMetrics, build_catalog};
use crate::config::{BenchmarkSetup, DashboardSetup, ModelInfo, ModelsSetup, TaskGroup};
use crate::metrics::ModelScores;
use crate::scan::{ModelScan, UnitFailure};

/// The single JSON artifact consumed by the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub metrics_setup: IndexMap<String, CatalogEntry>,
    pub task_groups: IndexMap<String, TaskGroup>,
    pub standalone_benchmarks: Vec<String>,

    /// One sorted benchmark list per configured language group
    #[serde(flatten)]
    pub language_lists: IndexMap<String, Vec<String>>,

    pub model_display_names: IndexMap<String, String>,
    pub model_categories: IndexMap<String, String>,
    pub model_organizations: IndexMap<String, String>,
    pub model_parameters: IndexMap<String, f64>,
    pub model_colors: IndexMap<String, String>,
    pub model_info: IndexMap<String, ModelInfo>,
    pub default_models: Vec<String>,

    /// Model directory -> scores
    pub models: IndexMap<String, ModelScores>,

    /// Training step -> scores
    pub progress: BTreeMap<u64, ModelScores>,
}

impl DashboardReport {
    pub fn model_names(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }

    pub fn checkpoint_steps(&self) -> Vec<u64> {
        self.progress.keys().copied().collect()
    }
}

/// A failed unit together with the directory it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedFailure {
    pub source: String,
    pub failure: UnitFailure,
}

/// Accumulates scans and produces the final report
pub struct ReportBuilder<'a> {
    benchmarks: &'a BenchmarkSetup,
    models_setup: &'a ModelsSetup,
    dashboard: &'a DashboardSetup,
    models: IndexMap<String, ModelScores>,
    progress: BTreeMap<u64, ModelScores>,
    discovered: DiscoveredMetrics,
    failures: Vec<SourcedFailure>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(
        benchmarks: &'a BenchmarkSetup,
        models_setup: &'a ModelsSetup,
        dashboard: &'a DashboardSetup,
    ) -> Self {
        Self {
            benchmarks,
            models_setup,
            dashboard,
            models: IndexMap::new(),
            progress: BTreeMap::new(),
            discovered: DiscoveredMetrics::new(),
            failures: Vec::new(),
        }
    }

    /// Add the scan of a model directory
    pub fn add_model(&mut self, name: impl Into<String>, scan: ModelScan) {
        let name = name.into();
        let scores = self.absorb(&name, scan);
        self.models.insert(name, scores);
    }

    /// Add the scan of a training checkpoint
    pub fn add_checkpoint(&mut self, step: u64, dir_name: &str, scan: ModelScan) {
        let scores = self.absorb(dir_name, scan);
        self.progress.insert(step, scores);
    }

    pub fn failures(&self) -> &[SourcedFailure] {
        &self.failures
    }

    fn absorb(&mut self, source: &str, scan: ModelScan) -> ModelScores {
        let discovered = std::mem::take(&mut self.discovered);
        self.discovered = discovered.merge(scan.discovered);
        self.failures
            .extend(scan.failures.into_iter().map(|failure| SourcedFailure {
                source: source.to_string(),
                failure,
            }));
        scan.scores
    }

    /// Build the catalog from everything discovered and assemble the report
    pub fn build(self) -> DashboardReport {
        let metrics_setup = build_catalog(self.benchmarks, &self.discovered);

        DashboardReport {
            metrics_setup,
            task_groups: self.dashboard.task_groups.clone(),
            standalone_benchmarks: self.dashboard.standalone_benchmarks.clone(),
            language_lists: self.dashboard.language_lists(self.benchmarks),
            model_display_names: self.models_setup.display_names(),
            model_categories: self.models_setup.categories(),
            model_organizations: self.models_setup.organizations(),
            model_parameters: self.models_setup.parameters(),
            model_colors: self.models_setup.colors(),
            model_info: self.models_setup.info(),
            default_models: self.models_setup.default_models(),
            models: self.models,
            progress: self.progress,
        }
    }
}
