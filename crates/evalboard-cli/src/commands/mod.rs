//! Command implementations

pub mod build;
pub mod check;

use anyhow::{Context, Result};
use evalboard_core::{BenchmarkSetup, BoardConfig, DashboardSetup};

/// Load the benchmark configuration and the dashboard layout
fn load_setups(config: &BoardConfig) -> Result<(BenchmarkSetup, DashboardSetup)> {
    let benchmarks = BenchmarkSetup::from_yaml_file(&config.metrics_setup)
        .with_context(|| format!("Failed to load {}", config.metrics_setup.display()))?;
    let dashboard = DashboardSetup::from_optional_file(&config.dashboard_setup)
        .with_context(|| format!("Failed to load {}", config.dashboard_setup.display()))?;
    tracing::debug!(
        "Loaded {} benchmarks, shots {:?}",
        benchmarks.len(),
        dashboard.shots
    );
    Ok((benchmarks, dashboard))
}
