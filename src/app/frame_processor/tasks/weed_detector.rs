// SPDX-License-Identifier: GPL-3.0-only

//! Weed detection task
//!
//! Detection is reached through the [`WeedDetector`] trait so the capture
//! flow never depends on how inference happens. The bundled
//! [`SimulatedWeedDetector`] waits a fixed interval and reports a canned
//! result set; a real model plugs in behind the same trait.

use crate::app::frame_processor::types::{Detection, FrameRegion};
use crate::backends::camera::types::CameraFrame;
use crate::constants::capture::SCAN_DURATION;
use chrono::Local;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Something that finds weeds in a frame
pub trait WeedDetector: Send + Sync {
    /// Analyze a frame. `None` means no frame was available yet (a live
    /// camera that has not delivered its first frame).
    fn detect(&self, frame: Option<Arc<CameraFrame>>) -> BoxFuture<'static, Vec<Detection>>;
}

/// Canned result: (label, confidence, bounds)
const CANNED: [(&str, u8, FrameRegion); 2] = [
    ("Dandelion", 94, FrameRegion::new(0.30, 0.25, 0.15, 0.25)),
    ("Thistle", 87, FrameRegion::new(0.55, 0.50, 0.20, 0.30)),
];

/// Placeholder detector that takes [`SCAN_DURATION`] and returns fixed results
#[derive(Debug, Clone)]
pub struct SimulatedWeedDetector {
    delay: Duration,
}

impl Default for SimulatedWeedDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedWeedDetector {
    pub fn new() -> Self {
        Self {
            delay: SCAN_DURATION,
        }
    }

    /// Detector with a custom delay (tests, CLI)
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn canned_detections() -> Vec<Detection> {
        let now = Local::now();
        CANNED
            .iter()
            .enumerate()
            .map(|(i, (label, confidence, bounds))| {
                Detection::new(i as u32 + 1, *label, *confidence, now, *bounds)
            })
            .collect()
    }
}

impl WeedDetector for SimulatedWeedDetector {
    fn detect(&self, frame: Option<Arc<CameraFrame>>) -> BoxFuture<'static, Vec<Detection>> {
        let delay = self.delay;
        async move {
            if let Some(frame) = &frame {
                debug!(width = frame.width, height = frame.height, "Simulated scan started");
            } else {
                debug!("Simulated scan started without a frame");
            }
            tokio::time::sleep(delay).await;
            Self::canned_detections()
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_set() {
        let detections = SimulatedWeedDetector::canned_detections();
        let scores: Vec<u8> = detections.iter().map(|d| d.confidence).collect();
        assert_eq!(scores, vec![94, 87]);
        assert_eq!(detections[0].id, 1);
        assert_eq!(detections[1].id, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detect_waits_scan_duration() {
        let detector = SimulatedWeedDetector::new();
        let started = tokio::time::Instant::now();
        let detections = detector.detect(None).await;
        assert_eq!(detections.len(), 2);
        assert!(started.elapsed() >= SCAN_DURATION);
    }
}
