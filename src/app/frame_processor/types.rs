// SPDX-License-Identifier: MPL-2.0

//! Core types for frame processing results
//!
//! These types represent the output of weed detection and are used for
//! rendering overlays, the statistics panel, and scan reports.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A rectangular region within a frame
///
/// Coordinates are normalized (0.0 to 1.0) relative to the frame dimensions.
/// This allows easy transformation to pixel coordinates regardless of
/// the actual frame size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRegion {
    /// Left edge (0.0 = left of frame, 1.0 = right of frame)
    pub x: f32,
    /// Top edge (0.0 = top of frame, 1.0 = bottom of frame)
    pub y: f32,
    /// Width as fraction of frame width
    pub width: f32,
    /// Height as fraction of frame height
    pub height: f32,
}

impl FrameRegion {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Pixel rectangle `(x, y, width, height)` clipped to the frame
    pub fn to_pixels(&self, frame_width: u32, frame_height: u32) -> (u32, u32, u32, u32) {
        let fw = frame_width as f32;
        let fh = frame_height as f32;
        let x0 = (self.x.clamp(0.0, 1.0) * fw).round() as u32;
        let y0 = (self.y.clamp(0.0, 1.0) * fh).round() as u32;
        let x1 = ((self.x + self.width).clamp(0.0, 1.0) * fw).round() as u32;
        let y1 = ((self.y + self.height).clamp(0.0, 1.0) * fh).round() as u32;
        (x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }
}

/// A weed identified in a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Identifier, unique within one scan
    pub id: u32,
    /// Species or class name
    pub label: String,
    /// Confidence in percent (0-100)
    pub confidence: u8,
    /// When the detector reported it
    pub observed_at: DateTime<Local>,
    /// Where in the frame it was found
    pub bounds: FrameRegion,
}

impl Detection {
    /// Create a detection; confidence is clamped to 100
    pub fn new(
        id: u32,
        label: impl Into<String>,
        confidence: u8,
        observed_at: DateTime<Local>,
        bounds: FrameRegion,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            confidence: confidence.min(100),
            observed_at,
            bounds,
        }
    }

    /// Overlay caption, e.g. "Dandelion 94%"
    pub fn caption(&self) -> String {
        format!("{} {}%", self.label, self.confidence)
    }
}

/// Human readable age of an observation: "12s ago", "3m ago", "2h ago"
pub fn format_age(observed_at: DateTime<Local>, now: DateTime<Local>) -> String {
    let secs = (now - observed_at).num_seconds().max(0);
    match secs {
        0..=59 => format!("{}s ago", secs),
        60..=3599 => format!("{}m ago", secs / 60),
        _ => format!("{}h ago", secs / 3600),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_confidence_clamped() {
        let d = Detection::new(1, "Thistle", 250, Local::now(), FrameRegion::new(0.0, 0.0, 0.1, 0.1));
        assert_eq!(d.confidence, 100);
        assert_eq!(d.caption(), "Thistle 100%");
    }

    #[test]
    fn test_region_to_pixels() {
        let region = FrameRegion::new(0.1, 0.1, 0.2, 0.2);
        assert_eq!(region.to_pixels(1000, 500), (100, 50, 200, 100));
    }

    #[test]
    fn test_region_clipped_to_frame() {
        let region = FrameRegion::new(0.9, 0.9, 0.5, 0.5);
        assert_eq!(region.to_pixels(100, 100), (90, 90, 10, 10));
    }

    #[test]
    fn test_format_age() {
        let now = Local::now();
        assert_eq!(format_age(now - Duration::seconds(12), now), "12s ago");
        assert_eq!(format_age(now - Duration::seconds(125), now), "2m ago");
        assert_eq!(format_age(now - Duration::hours(3), now), "3h ago");
        // Clock skew never yields negative ages
        assert_eq!(format_age(now + Duration::seconds(5), now), "0s ago");
    }
}
