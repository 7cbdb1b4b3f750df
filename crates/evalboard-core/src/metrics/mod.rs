//! Metrics collection and aggregation
//!
//! The collector turns a result document into per-metric observation lists;
//! the aggregator reduces each list into a [`MetricSummary`].

mod aggregator;
mod collector;
mod stderr;
mod types;

pub use aggregator::summarize;
pub use collector::MetricsCollector;
pub use stderr::estimate_stderr;
pub use types::{
    BenchmarkScores, MetricSummary, ModelScores, Observation, ObservationSet, SUBTASK_SEPARATOR,
    ShotScores, is_subtask_metric, virtual_metric_name,
};
