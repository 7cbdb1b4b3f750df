//! Benchmark definitions loaded from `metrics_setup.yaml`

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

static NO_EXCLUSIONS: BTreeSet<String> = BTreeSet::new();

/// Natural range of a benchmark's metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricScale {
    /// Values are probabilities or scores in 0..=1
    #[default]
    Unit,
    /// Values are percentages in 0..=100
    Percent,
}

impl MetricScale {
    /// Best achievable score on this scale
    pub fn max_performance(&self) -> f64 {
        match self {
            MetricScale::Unit => 1.0,
            MetricScale::Percent => 100.0,
        }
    }

    /// Map a value on this scale to a probability clamped to 0..=1
    pub fn to_probability(&self, value: f64) -> f64 {
        match self {
            MetricScale::Unit => value.clamp(0.0, 1.0),
            MetricScale::Percent => (value / 100.0).clamp(0.0, 1.0),
        }
    }

    /// Map a probability-domain quantity back onto this scale
    pub fn from_probability(&self, value: f64) -> f64 {
        match self {
            MetricScale::Unit => value,
            MetricScale::Percent => value * 100.0,
        }
    }
}

/// A named partition of a benchmark reported under its own task key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtaskDef {
    pub pretty_name: String,
    #[serde(default)]
    pub description: String,
}

/// Static definition of one benchmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Name shown in the dashboard
    pub pretty_name: String,

    #[serde(default)]
    pub description: String,

    /// Metric the dashboard shows by default
    pub main_metric: String,

    /// Expected score of a random guesser
    pub random_baseline: f64,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default)]
    pub evaluation_type: String,

    #[serde(default)]
    pub metric_scale: MetricScale,

    #[serde(default)]
    pub url: String,

    /// Subtask code -> definition, in declaration order
    #[serde(default)]
    pub subtasks: IndexMap<String, SubtaskDef>,

    /// Metrics never reported for this benchmark
    #[serde(default)]
    pub excluded_metrics: BTreeSet<String>,
}

fn default_category() -> String {
    "Uncategorized".to_string()
}

impl BenchmarkConfig {
    /// Declared subtasks, or `None` when the benchmark has none
    pub fn subtasks(&self) -> Option<&IndexMap<String, SubtaskDef>> {
        if self.subtasks.is_empty() {
            None
        } else {
            Some(&self.subtasks)
        }
    }

    /// Combine this benchmark's exclusions with the global ones
    pub fn exclusions<'a>(&'a self, global: &'a BTreeSet<String>) -> ExclusionSet<'a> {
        ExclusionSet {
            global,
            local: &self.excluded_metrics,
        }
    }
}

/// Union of global and per-benchmark metric exclusions
#[derive(Debug, Clone, Copy)]
pub struct ExclusionSet<'a> {
    global: &'a BTreeSet<String>,
    local: &'a BTreeSet<String>,
}

impl ExclusionSet<'static> {
    pub fn none() -> Self {
        ExclusionSet {
            global: &NO_EXCLUSIONS,
            local: &NO_EXCLUSIONS,
        }
    }
}

impl ExclusionSet<'_> {
    pub fn contains(&self, metric_name: &str) -> bool {
        self.global.contains(metric_name) || self.local.contains(metric_name)
    }
}

/// All benchmark definitions, in file order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkSetup {
    benchmarks: IndexMap<String, BenchmarkConfig>,
}

impl BenchmarkSetup {
    /// Load from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> BoardResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| BoardError::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|e| BoardError::yaml(path, e))
    }

    /// Load from a YAML string (useful for testing)
    pub fn from_yaml_str(yaml: &str) -> BoardResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| BoardError::yaml("<inline>", e))
    }

    pub fn get(&self, benchmark: &str) -> Option<&BenchmarkConfig> {
        self.benchmarks.get(benchmark)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BenchmarkConfig)> {
        self.benchmarks.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.benchmarks.keys()
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}
