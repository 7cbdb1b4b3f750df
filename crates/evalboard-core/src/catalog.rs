//! Benchmark catalog for the dashboard's metric selectors
//!
//! Combines static benchmark configuration with the metric names actually
//! seen while aggregating. The names are gathered in [`DiscoveredMetrics`],
//! which callers fold over every scanned model and checkpoint before
//! building the catalog.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::{BenchmarkSetup, MetricScale, SubtaskDef};
use crate::metrics::{ShotScores, is_subtask_metric};

/// Benchmark -> metric names seen in any scanned result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveredMetrics {
    by_benchmark: BTreeMap<String, BTreeSet<String>>,
}

impl DiscoveredMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the metrics of one (benchmark, shot) summary
    pub fn record(&mut self, benchmark: &str, scores: &ShotScores) {
        self.by_benchmark
            .entry(benchmark.to_string())
            .or_default()
            .extend(scores.keys().cloned());
    }

    /// Fold another accumulator into this one
    pub fn merge(mut self, other: DiscoveredMetrics) -> Self {
        for (benchmark, names) in other.by_benchmark {
            self.by_benchmark.entry(benchmark).or_default().extend(names);
        }
        self
    }

    pub fn get(&self, benchmark: &str) -> Option<&BTreeSet<String>> {
        self.by_benchmark.get(benchmark)
    }
}

/// Dashboard metadata for one benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub pretty_name: String,
    pub description: String,
    pub main_metric: String,
    pub random_baseline: f64,
    pub max_performance: f64,
    pub category: String,
    pub evaluation_type: String,
    pub metric_scale: MetricScale,
    pub url: String,
    pub available_metrics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<IndexMap<String, SubtaskDef>>,
}

/// Build one catalog entry per configured benchmark, in configuration order
pub fn build_catalog(
    setup: &BenchmarkSetup,
    discovered: &DiscoveredMetrics,
) -> IndexMap<String, CatalogEntry> {
    let empty = BTreeSet::new();

    setup
        .iter()
        .map(|(benchmark, config)| {
            let found = discovered.get(benchmark).unwrap_or(&empty);
            let entry = CatalogEntry {
                pretty_name: config.pretty_name.clone(),
                description: config.description.clone(),
                main_metric: config.main_metric.clone(),
                random_baseline: config.random_baseline,
                max_performance: config.metric_scale.max_performance(),
                category: config.category.clone(),
                evaluation_type: config.evaluation_type.clone(),
                metric_scale: config.metric_scale,
                url: config.url.clone(),
                available_metrics: order_metrics(&config.main_metric, found),
                subtasks: config.subtasks().cloned(),
            };
            (benchmark.clone(), entry)
        })
        .collect()
}

/// Main metric first when seen, then base metrics, then subtask metrics.
///
/// Both groups are alphabetical; `found` is a sorted set already.
fn order_metrics(main_metric: &str, found: &BTreeSet<String>) -> Vec<String> {
    let mut ordered = Vec::with_capacity(found.len());
    if found.contains(main_metric) {
        ordered.push(main_metric.to_string());
    }
    ordered.extend(
        found
            .iter()
            .filter(|m| !is_subtask_metric(m) && m.as_str() != main_metric)
            .cloned(),
    );
    ordered.extend(found.iter().filter(|m| is_subtask_metric(m)).cloned());

    if ordered.is_empty() {
        return found.iter().cloned().collect();
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricSummary, Observation};

    const SETUP: &str = r#"
noreval_multiblimp:
  pretty_name: MultiBLiMP
  main_metric: acc
  random_baseline: 0.5
  subtasks:
    p1:
      pretty_name: Person
      description: Person agreement
norsumm_nob:
  pretty_name: NorSumm
  main_metric: acc
  random_baseline: 0
  metric_scale: percent
never_run:
  pretty_name: Never
  main_metric: acc
  random_baseline: 0.25
"#;

    fn scores(names: &[&str]) -> ShotScores {
        let summary = MetricSummary::from_observations(&[Observation::new(0.5, None)]).unwrap();
        names
            .iter()
            .map(|n| (n.to_string(), summary.clone()))
            .collect()
    }

    #[test]
    fn test_available_metrics_order() {
        let setup = BenchmarkSetup::from_yaml_str(SETUP).unwrap();
        let mut discovered = DiscoveredMetrics::new();
        discovered.record(
            "noreval_multiblimp",
            &scores(&["acc: Person", "brier", "acc", "acc: Gender"]),
        );

        let catalog = build_catalog(&setup, &discovered);
        assert_eq!(
            catalog["noreval_multiblimp"].available_metrics,
            vec!["acc", "brier", "acc: Gender", "acc: Person"]
        );
    }

    #[test]
    fn test_undiscovered_main_metric_is_dropped() {
        let setup = BenchmarkSetup::from_yaml_str(SETUP).unwrap();
        let mut discovered = DiscoveredMetrics::new();
        discovered.record("norsumm_nob", &scores(&["rougeL", "bleu"]));

        let catalog = build_catalog(&setup, &discovered);
        let entry = &catalog["norsumm_nob"];
        assert_eq!(entry.available_metrics, vec!["bleu", "rougeL"]);
        assert_eq!(entry.max_performance, 100.0);
        assert!(entry.subtasks.is_none());
    }

    #[test]
    fn test_subtask_metadata_copied_without_data() {
        let setup = BenchmarkSetup::from_yaml_str(SETUP).unwrap();
        let catalog = build_catalog(&setup, &DiscoveredMetrics::new());

        let blimp = &catalog["noreval_multiblimp"];
        assert!(blimp.available_metrics.is_empty());
        assert_eq!(blimp.max_performance, 1.0);
        let subtasks = blimp.subtasks.as_ref().unwrap();
        assert_eq!(subtasks["p1"].pretty_name, "Person");
        assert_eq!(subtasks["p1"].description, "Person agreement");

        let names: Vec<_> = catalog.keys().cloned().collect();
        assert_eq!(names, vec!["noreval_multiblimp", "norsumm_nob", "never_run"]);
    }

    #[test]
    fn test_merge_unions_names() {
        let mut a = DiscoveredMetrics::new();
        a.record("x", &scores(&["acc"]));
        let mut b = DiscoveredMetrics::new();
        b.record("x", &scores(&["f1"]));
        b.record("y", &scores(&["bleu"]));

        let merged = a.merge(b);
        let x: Vec<_> = merged.get("x").unwrap().iter().cloned().collect();
        assert_eq!(x, vec!["acc", "f1"]);
        assert!(merged.get("y").is_some());
    }

    #[test]
    fn test_serialized_entry_omits_absent_subtasks() {
        let setup = BenchmarkSetup::from_yaml_str(SETUP).unwrap();
        let catalog = build_catalog(&setup, &DiscoveredMetrics::new());
        let json = serde_json::to_value(&catalog["never_run"]).unwrap();
        assert!(json.get("subtasks").is_none());
        assert_eq!(json["metric_scale"], "unit");
        assert_eq!(json["max_performance"], 1.0);
    }
}
