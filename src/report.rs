// SPDX-License-Identifier: GPL-3.0-only

//! Scan reports
//!
//! A report captures one moment of the weeding session: where the frame
//! came from, what the last scan found, and the session totals.

use crate::app::frame_processor::Detection;
use crate::capture::{CaptureFlow, ScanStats};
use crate::constants::robot;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session totals as written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    pub scans: u32,
    pub total_weeds: u32,
    pub last_count: Option<u32>,
    pub change_from_previous: Option<i64>,
}

impl From<ScanStats> for ReportStats {
    fn from(stats: ScanStats) -> Self {
        Self {
            scans: stats.scans,
            total_weeds: stats.total_weeds,
            last_count: stats.last_count,
            change_from_previous: stats.delta_from_last_scan(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub id: Uuid,
    pub generated_at: DateTime<Local>,
    pub robot: String,
    /// "camera: <device>" or "image: <file>", None when nothing was open
    pub source: Option<String>,
    pub detections: Vec<Detection>,
    pub stats: ReportStats,
}

impl ScanReport {
    pub fn new(source: Option<String>, detections: Vec<Detection>, stats: ScanStats) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Local::now(),
            robot: robot::NAME.to_string(),
            source,
            detections,
            stats: stats.into(),
        }
    }

    /// Snapshot of the capture flow's current results
    pub fn from_flow(flow: &CaptureFlow) -> Self {
        Self::new(flow.source_label(), flow.detections().to_vec(), flow.stats())
    }

    /// File name derived from the generation time
    pub fn file_name(&self) -> String {
        format!("scan-{}.json", self.generated_at.format("%Y%m%d-%H%M%S"))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::frame_processor::SimulatedWeedDetector;

    #[test]
    fn test_report_contents() {
        let mut stats = ScanStats::default();
        stats.record(3);
        stats.record(2);
        let report = ScanReport::new(
            Some("image: field.jpg".into()),
            SimulatedWeedDetector::canned_detections(),
            stats,
        );

        assert_eq!(report.stats.total_weeds, 5);
        assert_eq!(report.stats.change_from_previous, Some(-1));
        assert!(report.file_name().starts_with("scan-"));
        assert!(report.file_name().ends_with(".json"));

        let json = report.to_json().unwrap();
        assert!(json.contains("Dandelion"));
        let parsed: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, report.id);
        assert_eq!(parsed.detections.len(), 2);
    }

    #[test]
    fn test_report_from_idle_flow() {
        let flow = CaptureFlow::new();
        let report = ScanReport::from_flow(&flow);
        assert!(report.source.is_none());
        assert!(report.detections.is_empty());
        assert_eq!(report.stats.scans, 0);
    }
}
