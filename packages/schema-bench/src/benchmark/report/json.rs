//! JSON report persistence
//!
//! A saved report is a pretty-printed array of trial results and is read back
//! unchanged as the `--compare` input of a later run.

use crate::benchmark::{BenchmarkError, BenchmarkResult, Report};
use std::path::Path;
use tracing::{info, warn};

pub fn serialize(report: &Report) -> BenchmarkResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn parse(content: &str) -> BenchmarkResult<Report> {
    Ok(serde_json::from_str(content)?)
}

pub struct JsonReporter;

impl JsonReporter {
    pub fn save(report: &Report, path: impl AsRef<Path>) -> BenchmarkResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serialize(report)?)?;
        info!("Saved {} result(s) to {}", report.len(), path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> BenchmarkResult<Report> {
        let content = std::fs::read_to_string(path)?;
        parse(&content)
    }

    /// Load a previous run, or `None` when the file is missing or malformed
    pub fn load_previous(path: impl AsRef<Path>) -> Option<Report> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(report) => {
                info!(
                    "Comparing against {} ({} result(s))",
                    path.display(),
                    report.len()
                );
                Some(report)
            }
            Err(BenchmarkError::Io(e)) => {
                warn!(
                    "Cannot read {}: {}; skipping comparison",
                    path.display(),
                    e
                );
                None
            }
            Err(e) => {
                warn!(
                    "Malformed report {}: {}; skipping comparison",
                    path.display(),
                    e
                );
                None
            }
        }
    }
}
