//! Static configuration: benchmarks, models, dashboard layout and paths

mod benchmarks;
mod dashboard;
mod models;
mod paths;

pub use benchmarks::{BenchmarkConfig, BenchmarkSetup, ExclusionSet, MetricScale, SubtaskDef};
pub use dashboard::{DashboardSetup, LanguageGroup, TaskGroup};
pub use models::{ModelConfig, ModelInfo, ModelsSetup};
pub use paths::BoardConfig;
