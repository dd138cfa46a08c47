// SPDX-License-Identifier: GPL-3.0-only

//! Capture flow value types

use crate::backends::camera::types::CameraFrame;
use serde::Serialize;
use std::sync::Arc;

/// Which input the weed-detection page is working with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CaptureMode {
    /// Nothing selected (also reported while a camera request is pending)
    #[default]
    Idle,
    /// A live camera stream is held
    LiveCamera,
    /// A still image is held
    StillImage,
}

/// Identifies one pending asynchronous operation
///
/// Completions carry the ticket they were issued with; the controller
/// applies a completion only while its ticket is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub(crate) u64);

/// A still image read from disk
#[derive(Clone)]
pub struct ImageAsset {
    /// File name shown to the user
    pub name: String,
    /// Detected MIME type, e.g. image/jpeg
    pub mime: &'static str,
    /// The file's bytes as read
    pub encoded: Arc<[u8]>,
    /// Decoded pixels used for display and scanning
    pub frame: Arc<CameraFrame>,
}

impl ImageAsset {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.frame.width, self.frame.height)
    }
}

impl PartialEq for ImageAsset {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.mime == other.mime && self.encoded == other.encoded
    }
}

impl std::fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAsset")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("bytes", &self.encoded.len())
            .field("size", &self.dimensions())
            .finish()
    }
}

/// What the caller needs to run a scan
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub ticket: Ticket,
    /// Frame to analyze; None if a live camera has not produced one yet
    pub frame: Option<Arc<CameraFrame>>,
}

/// Running totals for the statistics panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Completed scans
    pub scans: u32,
    /// Weeds found across all scans
    pub total_weeds: u32,
    /// Weeds found by the latest scan
    pub last_count: Option<u32>,
    /// Weeds found by the scan before it
    pub previous_count: Option<u32>,
}

impl ScanStats {
    pub fn record(&mut self, count: u32) {
        self.scans += 1;
        self.total_weeds += count;
        self.previous_count = self.last_count;
        self.last_count = Some(count);
    }

    /// Change of the latest scan relative to the one before it
    pub fn delta_from_last_scan(&self) -> Option<i64> {
        match (self.last_count, self.previous_count) {
            (Some(last), Some(prev)) => Some(last as i64 - prev as i64),
            (Some(last), None) => Some(last as i64),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_delta() {
        let mut stats = ScanStats::default();
        assert_eq!(stats.delta_from_last_scan(), None);

        stats.record(2);
        assert_eq!(stats.delta_from_last_scan(), Some(2));

        stats.record(5);
        stats.record(4);
        assert_eq!(stats.delta_from_last_scan(), Some(-1));
        assert_eq!(stats.total_weeds, 11);
        assert_eq!(stats.scans, 3);
    }
}
