//! JSON report generation

use std::path::Path;

use super::DashboardReport;
use crate::error::{BoardError, BoardResult};

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a compact JSON report; non-ASCII text is written as is
    pub fn generate(report: &DashboardReport) -> BoardResult<String> {
        serde_json::to_string(report).map_err(|e| BoardError::json("<report>", e))
    }

    /// Write the compact report, creating parent directories; returns bytes written
    pub fn write(report: &DashboardReport, path: impl AsRef<Path>) -> BoardResult<u64> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| BoardError::io(parent, e))?;
        }
        let json = Self::generate(report)?;
        std::fs::write(path, &json).map_err(|e| BoardError::io(path, e))?;
        Ok(json.len() as u64)
    }
}
