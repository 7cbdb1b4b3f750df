//! Filesystem locations used by a build or audit run

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Resolved input and output paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Repository root all relative defaults hang off
    pub root: PathBuf,

    /// One sub-directory per evaluated model
    pub results_dir: PathBuf,

    /// One sub-directory per training checkpoint (`name-<step>`)
    pub progress_dir: PathBuf,

    pub metrics_setup: PathBuf,

    pub models_setup: PathBuf,

    /// Optional layout file
    pub dashboard_setup: PathBuf,

    /// Where the report is written
    pub output_file: PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl BoardConfig {
    /// Conventional layout under a root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            results_dir: root.join("results"),
            progress_dir: root.join("NorOLMo_progress"),
            metrics_setup: root.join("metrics_setup.yaml"),
            models_setup: root.join("models_setup.yaml"),
            dashboard_setup: root.join("dashboard_setup.yaml"),
            output_file: root.join("docs").join("data.json"),
            root,
        }
    }

    pub fn with_results_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.results_dir = self.resolve(dir);
        self
    }

    pub fn with_progress_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.progress_dir = self.resolve(dir);
        self
    }

    pub fn with_metrics_setup(mut self, file: impl AsRef<Path>) -> Self {
        self.metrics_setup = self.resolve(file);
        self
    }

    pub fn with_models_setup(mut self, file: impl AsRef<Path>) -> Self {
        self.models_setup = self.resolve(file);
        self
    }

    pub fn with_dashboard_setup(mut self, file: impl AsRef<Path>) -> Self {
        self.dashboard_setup = self.resolve(file);
        self
    }

    pub fn with_output_file(mut self, file: impl AsRef<Path>) -> Self {
        self.output_file = self.resolve(file);
        self
    }

    /// Relative paths are taken relative to the root
    fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
