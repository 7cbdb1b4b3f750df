//! Dashboard layout and aggregation settings from `dashboard_setup.yaml`
//!
//! The file is optional; every field has a default so an absent file
//! produces an ungrouped dashboard over the 0/1/5-shot settings.

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::BenchmarkSetup;
use crate::error::{BoardError, BoardResult};

/// Benchmarks shown side by side in one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskGroup {
    pub benchmarks: Vec<String>,
    pub labels: Vec<String>,
}

/// Rule for a language list emitted into the report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageGroup {
    /// Benchmarks whose name contains this substring are members
    pub marker: Option<String>,

    /// Additional members listed explicitly
    #[serde(default)]
    pub include: Vec<String>,
}

impl LanguageGroup {
    /// Sorted, de-duplicated members of this group
    pub fn members(&self, setup: &BenchmarkSetup) -> Vec<String> {
        let mut members: BTreeSet<String> = self.include.iter().cloned().collect();
        if let Some(marker) = self.marker.as_deref().filter(|m| !m.is_empty()) {
            members.extend(setup.names().filter(|b| b.contains(marker)).cloned());
        }
        members.into_iter().collect()
    }
}

/// Aggregation and presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSetup {
    /// Shot settings; each maps to a `{shot}-shot` directory
    #[serde(default = "default_shots")]
    pub shots: Vec<String>,

    /// Metrics excluded for every benchmark
    #[serde(default)]
    pub excluded_metrics: BTreeSet<String>,

    #[serde(default)]
    pub task_groups: IndexMap<String, TaskGroup>,

    #[serde(default)]
    pub standalone_benchmarks: Vec<String>,

    /// Output key -> membership rule
    #[serde(default)]
    pub language_groups: IndexMap<String, LanguageGroup>,
}

fn default_shots() -> Vec<String> {
    vec!["0".to_string(), "1".to_string(), "5".to_string()]
}

impl Default for DashboardSetup {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            excluded_metrics: BTreeSet::new(),
            task_groups: IndexMap::new(),
            standalone_benchmarks: Vec::new(),
            language_groups: IndexMap::new(),
        }
    }
}

impl DashboardSetup {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> BoardResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| BoardError::io(path, e))?;
        let setup: Self = serde_yaml::from_str(&content).map_err(|e| BoardError::yaml(path, e))?;
        setup.validate()?;
        Ok(setup)
    }

    /// Load if the file exists, otherwise fall back to defaults
    pub fn from_optional_file(path: impl AsRef<Path>) -> BoardResult<Self> {
        let path = path.as_ref();
        if path.is_file() {
            Self::from_yaml_file(path)
        } else {
            tracing::debug!("No dashboard setup at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn from_yaml_str(yaml: &str) -> BoardResult<Self> {
        let setup: Self = serde_yaml::from_str(yaml).map_err(|e| BoardError::yaml("<inline>", e))?;
        setup.validate()?;
        Ok(setup)
    }

    /// Directory name holding results for a shot setting
    pub fn shot_dir_name(shot: &str) -> String {
        format!("{}-shot", shot)
    }

    /// Resolve every language group against the configured benchmarks
    pub fn language_lists(&self, setup: &BenchmarkSetup) -> IndexMap<String, Vec<String>> {
        self.language_groups
            .iter()
            .map(|(key, group)| (key.clone(), group.members(setup)))
            .collect()
    }

    fn validate(&self) -> BoardResult<()> {
        if self.shots.is_empty() {
            return Err(BoardError::config("at least one shot setting is required"));
        }
        for (name, group) in &self.task_groups {
            if group.benchmarks.len() != group.labels.len() {
                return Err(BoardError::config(format!(
                    "task group '{}' has {} benchmarks but {} labels",
                    name,
                    group.benchmarks.len(),
                    group.labels.len()
                )));
            }
        }
        Ok(())
    }
}
