//! Evalboard: prompt-variant aggregation for evaluation dashboards
//!
//! This crate turns per-model, per-benchmark result documents from an
//! evaluation harness into one consolidated dashboard report.
//!
//! # Features
//!
//! - **Metric Collection**: gathers point estimates across prompt variants
//!   and declared subtasks, with binomial stderr estimates when the harness
//!   reports none
//! - **Aggregation**: max/mean/median/min, stderr propagation and prompt
//!   dispersion per (benchmark, shot)
//! - **Benchmark Catalog**: available metrics per benchmark, ordered for the
//!   dashboard's selectors
//! - **Auditing**: lists missing shots, result files, main metrics and
//!   subtask entries
//!
//! # Example
//!
//! ```rust,ignore
//! use evalboard_core::{BenchmarkSetup, DashboardSetup, ModelScanner, ModelsSetup, ReportBuilder};
//!
//! let benchmarks = BenchmarkSetup::from_yaml_file("metrics_setup.yaml")?;
//! let models = ModelsSetup::from_yaml_file("models_setup.yaml")?;
//! let dashboard = DashboardSetup::default();
//!
//! let scanner = ModelScanner::new(&benchmarks, &dashboard);
//! let mut builder = ReportBuilder::new(&benchmarks, &models, &dashboard);
//! builder.add_model("normistral-7b", scanner.scan("results/normistral-7b"));
//! let report = builder.build();
//! ```

pub mod audit;
pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod metrics;
pub mod report;
pub mod scan;

// Re-exports for convenience
pub use audit::{AuditReport, Auditor};
pub use catalog::{CatalogEntry, DiscoveredMetrics, build_catalog};
pub use config::{BenchmarkConfig, BenchmarkSetup, BoardConfig, DashboardSetup, MetricScale, ModelsSetup};
pub use document::{ResultDocument, TaskKeyMatch};
pub use error::{BoardError, BoardResult};
pub use metrics::{MetricSummary, MetricsCollector, Observation, estimate_stderr, summarize};
pub use report::{DashboardReport, JsonReporter, ReportBuilder};
pub use scan::{ModelScan, ModelScanner, UnitFailure};
