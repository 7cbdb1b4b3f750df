//! Result documents produced by the evaluation harness
//!
//! One document covers one (model, benchmark, shot) run. `results` maps a
//! task key to that task's metric table; `n-samples` maps a task key to the
//! number of evaluated items. Key order is preserved so that prompt variants
//! are visited in the order the harness wrote them.

mod task_key;

use std::path::Path;

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BoardError, BoardResult};

pub use task_key::TaskKeyMatch;

/// Suffix marking a point estimate in a metric table
pub const VALUE_SUFFIX: &str = ",none";

/// Suffix marking a standard error in a metric table
pub const STDERR_SUFFIX: &str = "_stderr,none";

/// Metric key -> raw value for one task key
pub type TaskMetrics = serde_json::Map<String, Value>;

/// Parsed harness output.
///
/// The document itself and its `results` / `n-samples` sections must be JSON
/// objects. Individual entries are kept raw: an entry of the wrong shape only
/// makes that task key absent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultDocument {
    pub results: IndexMap<String, Value>,

    #[serde(rename = "n-samples")]
    pub n_samples: IndexMap<String, Value>,
}

impl<'de> Deserialize<'de> for ResultDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // a map visitor only, so arrays are rejected
        let mut root = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            results: section(root.remove("results"), "results")?,
            n_samples: section(root.remove("n-samples"), "n-samples")?,
        })
    }
}

fn section<E: de::Error>(value: Option<Value>, name: &str) -> Result<IndexMap<String, Value>, E> {
    match value {
        None | Some(Value::Null) => Ok(IndexMap::new()),
        Some(Value::Object(entries)) => Ok(entries.into_iter().collect()),
        Some(other) => Err(E::custom(format!(
            "`{}` must be an object, found {}",
            name,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ResultDocument {
    /// Read and parse a document; any failure is structural
    pub fn from_file(path: impl AsRef<Path>) -> BoardResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| BoardError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| BoardError::json(path, e))
    }

    pub fn from_value(value: Value) -> BoardResult<Self> {
        serde_json::from_value(value).map_err(|e| BoardError::json("<inline>", e))
    }

    /// Task keys whose entry is a metric table, in document order
    pub fn tasks(&self) -> impl Iterator<Item = (&String, &TaskMetrics)> {
        self.results
            .iter()
            .filter_map(|(key, entry)| entry.as_object().map(|metrics| (key, metrics)))
    }

    /// Metric table of one task key; `None` when absent or not a table
    pub fn task_metrics(&self, task_key: &str) -> Option<&TaskMetrics> {
        self.results.get(task_key)?.as_object()
    }

    /// Effective count if non-zero, else original count if non-zero
    pub fn sample_count(&self, task_key: &str) -> Option<f64> {
        let counts = self.n_samples.get(task_key)?.as_object()?;
        let usable = |field: &str| counts.get(field).and_then(Value::as_f64).filter(|n| *n != 0.0);
        usable("effective").or_else(|| usable("original"))
    }
}

/// Base metric name of a point-estimate key, `None` for stderr or foreign keys
pub fn point_estimate_name(metric_key: &str) -> Option<&str> {
    if metric_key.contains(STDERR_SUFFIX) {
        return None;
    }
    metric_key.strip_suffix(VALUE_SUFFIX)
}

/// Key holding the point estimate of a metric
pub fn value_key(metric_name: &str) -> String {
    format!("{}{}", metric_name, VALUE_SUFFIX)
}

/// Key holding the standard error of a metric
pub fn stderr_key(metric_name: &str) -> String {
    format!("{}{}", metric_name, STDERR_SUFFIX)
}

/// Numeric view of a metric value; strings such as "N/A" are not numbers
pub fn numeric(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}
