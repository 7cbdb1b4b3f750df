//! Model presentation metadata loaded from `models_setup.yaml`

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

/// Presentation metadata for one model directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    pub display_name: Option<String>,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default)]
    pub organization: String,

    /// Parameter count in billions
    #[serde(default)]
    pub parameters: f64,

    /// Whether the dashboard selects this model on load
    #[serde(default)]
    pub default: bool,

    pub color: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub huggingface_url: String,
}

fn default_category() -> String {
    "multilingual".to_string()
}

/// Model card entry emitted for models with a description or link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub description: String,
    pub huggingface_url: String,
}

/// All model definitions, keyed by result directory name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelsSetup {
    models: IndexMap<String, ModelConfig>,
}

impl ModelsSetup {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> BoardResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| BoardError::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|e| BoardError::yaml(path, e))
    }

    pub fn from_yaml_str(yaml: &str) -> BoardResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| BoardError::yaml("<inline>", e))
    }

    pub fn display_names(&self) -> IndexMap<String, String> {
        self.models
            .iter()
            .map(|(dir, cfg)| {
                let name = cfg.display_name.clone().unwrap_or_else(|| dir.clone());
                (dir.clone(), name)
            })
            .collect()
    }

    pub fn categories(&self) -> IndexMap<String, String> {
        self.project(|cfg| cfg.category.clone())
    }

    pub fn organizations(&self) -> IndexMap<String, String> {
        self.project(|cfg| cfg.organization.clone())
    }

    pub fn parameters(&self) -> IndexMap<String, f64> {
        self.project(|cfg| cfg.parameters)
    }

    /// Colors of models that declare one
    pub fn colors(&self) -> IndexMap<String, String> {
        self.models
            .iter()
            .filter_map(|(dir, cfg)| {
                cfg.color
                    .as_ref()
                    .filter(|c| !c.is_empty())
                    .map(|c| (dir.clone(), c.clone()))
            })
            .collect()
    }

    /// Model cards of models with a description or Hugging Face link
    pub fn info(&self) -> IndexMap<String, ModelInfo> {
        self.models
            .iter()
            .filter(|(_, cfg)| !cfg.description.is_empty() || !cfg.huggingface_url.is_empty())
            .map(|(dir, cfg)| {
                (
                    dir.clone(),
                    ModelInfo {
                        description: cfg.description.clone(),
                        huggingface_url: cfg.huggingface_url.clone(),
                    },
                )
            })
            .collect()
    }

    pub fn default_models(&self) -> Vec<String> {
        self.models
            .iter()
            .filter(|(_, cfg)| cfg.default)
            .map(|(dir, _)| dir.clone())
            .collect()
    }

    fn project<T>(&self, f: impl Fn(&ModelConfig) -> T) -> IndexMap<String, T> {
        self.models
            .iter()
            .map(|(dir, cfg)| (dir.clone(), f(cfg)))
            .collect()
    }
}
