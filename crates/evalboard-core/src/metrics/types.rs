//! Core metric types for prompt-variant aggregation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Separator between a base metric and a subtask's pretty name.
///
/// Never part of a real metric name, so it alone tells virtual subtask
/// metrics apart from base metrics.
pub const SUBTASK_SEPARATOR: &str = ": ";

/// Name of the per-subtask metric derived from a base metric
pub fn virtual_metric_name(base_metric: &str, subtask_pretty_name: &str) -> String {
    format!("{}{}{}", base_metric, SUBTASK_SEPARATOR, subtask_pretty_name)
}

/// Whether a metric name was derived from a subtask
pub fn is_subtask_metric(metric_name: &str) -> bool {
    metric_name.contains(SUBTASK_SEPARATOR)
}

/// One metric value read from one task key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub value: f64,
    pub stderr: Option<f64>,
}

impl Observation {
    pub fn new(value: f64, stderr: Option<f64>) -> Self {
        Self { value, stderr }
    }
}

/// Metric name -> observations in visitation order
pub type ObservationSet = IndexMap<String, Vec<Observation>>;

/// Reduction of every observation of one metric in one (benchmark, shot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,

    /// Position of the first observation holding the maximum
    pub max_prompt_idx: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stderr: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stderr: Option<f64>,

    /// Present only when every observation had a stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_stderr: Option<f64>,

    /// Stderr of the observation closest to the median
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_stderr: Option<f64>,

    pub n_prompts: usize,

    /// Sample standard deviation across prompt variants
    pub prompt_sd: f64,

    /// Median absolute deviation from the median
    pub prompt_mad: f64,
}

/// Metric name -> summary for one (benchmark, shot)
pub type ShotScores = IndexMap<String, MetricSummary>;

/// Shot setting -> scores for one benchmark
pub type BenchmarkScores = IndexMap<String, ShotScores>;

/// Benchmark -> scores for one model or checkpoint
pub type ModelScores = IndexMap<String, BenchmarkScores>;
