//! Metric collector for one benchmark in one result document
//!
//! Gathers every qualifying point estimate across prompt variants, and
//! across declared subtasks, pairing each with its standard error.

use indexmap::IndexMap;

use super::stderr::estimate_stderr;
use super::types::{Observation, ObservationSet, virtual_metric_name};
use crate::config::{BenchmarkConfig, ExclusionSet, MetricScale, SubtaskDef};
use crate::document::{self, ResultDocument, TaskKeyMatch, TaskMetrics};

/// Collector bound to one benchmark's settings
pub struct MetricsCollector<'a> {
    benchmark: &'a str,
    subtasks: Option<&'a IndexMap<String, SubtaskDef>>,
    scale: MetricScale,
    exclusions: ExclusionSet<'a>,
}

impl<'a> MetricsCollector<'a> {
    /// Create a collector with explicit settings
    pub fn new(
        benchmark: &'a str,
        subtasks: Option<&'a IndexMap<String, SubtaskDef>>,
        scale: MetricScale,
        exclusions: ExclusionSet<'a>,
    ) -> Self {
        Self {
            benchmark,
            subtasks,
            scale,
            exclusions,
        }
    }

    /// Create a collector from a benchmark's configuration
    pub fn for_benchmark(
        benchmark: &'a str,
        config: &'a BenchmarkConfig,
        exclusions: ExclusionSet<'a>,
    ) -> Self {
        Self::new(benchmark, config.subtasks(), config.metric_scale, exclusions)
    }

    /// Collect observations, or `None` when nothing qualified
    pub fn collect(&self, doc: &ResultDocument) -> Option<ObservationSet> {
        let mut observations = ObservationSet::new();

        for (task_key, task_metrics) in doc.tasks() {
            if let Some(matched) = TaskKeyMatch::classify(task_key, self.benchmark) {
                tracing::trace!(task_key = %task_key, ?matched, "collecting task key");
                self.collect_task(doc, task_key, task_metrics, &matched, &mut observations);
            }
        }

        if let Some(subtasks) = self.subtasks {
            for (code, subtask) in subtasks {
                let task_key = TaskKeyMatch::subtask_key(self.benchmark, code);
                let Some(task_metrics) = doc.task_metrics(&task_key) else {
                    continue;
                };
                self.collect_task(
                    doc,
                    &task_key,
                    task_metrics,
                    &TaskKeyMatch::Subtask(&subtask.pretty_name),
                    &mut observations,
                );
            }
        }

        if observations.is_empty() {
            None
        } else {
            Some(observations)
        }
    }

    fn collect_task(
        &self,
        doc: &ResultDocument,
        task_key: &str,
        task_metrics: &TaskMetrics,
        matched: &TaskKeyMatch<'_>,
        observations: &mut ObservationSet,
    ) {
        let sample_count = doc.sample_count(task_key);

        for (metric_key, raw) in task_metrics {
            let Some(metric_name) = document::point_estimate_name(metric_key) else {
                continue;
            };
            if self.exclusions.contains(metric_name) {
                continue;
            }
            let Some(value) = document::numeric(raw) else {
                continue;
            };

            let stderr = estimate_stderr(task_metrics, metric_name, sample_count, self.scale);
            let target = match matched {
                TaskKeyMatch::Subtask(pretty) => virtual_metric_name(metric_name, pretty),
                _ => metric_name.to_string(),
            };
            observations
                .entry(target)
                .or_default()
                .push(Observation::new(value, stderr));
        }
    }
}
