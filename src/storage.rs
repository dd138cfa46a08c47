// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for scan reports

use crate::errors::{AppError, AppResult};
use crate::report::ScanReport;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default report location: ~/Documents/agribot
pub fn default_report_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agribot")
}

/// Write a report into `dir`, creating it if needed. Returns the file path.
pub async fn write_report(dir: &Path, report: &ScanReport) -> AppResult<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Storage(format!("cannot create {}: {}", dir.display(), e)))?;

    let path = unique_path(dir, &report.file_name()).await;
    let json = report.to_json()?;
    debug!(path = %path.display(), bytes = json.len(), "Writing scan report");

    tokio::fs::write(&path, json)
        .await
        .map_err(|e| AppError::Storage(format!("cannot write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), detections = report.detections.len(), "Scan report saved");
    Ok(path)
}

/// Avoid overwriting a report generated within the same second
async fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
        return candidate;
    }

    let stem = file_name.trim_end_matches(".json");
    let mut n = 1;
    loop {
        let candidate = dir.join(format!("{}-{}.json", stem, n));
        if !tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::ScanStats;

    #[test]
    fn test_default_directory_name() {
        assert!(default_report_directory().ends_with("agribot"));
    }

    #[tokio::test]
    async fn test_write_report_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("reports").join("field-7");
        let report = ScanReport::new(None, Vec::new(), ScanStats::default());

        let path = write_report(&target, &report).await.unwrap();
        assert!(path.starts_with(&target));

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: ScanReport = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.id, report.id);
    }

    #[tokio::test]
    async fn test_same_second_reports_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let report = ScanReport::new(None, Vec::new(), ScanStats::default());

        let first = write_report(dir.path(), &report).await.unwrap();
        let second = write_report(dir.path(), &report).await.unwrap();
        assert_ne!(first, second);
    }
}
