// SPDX-License-Identifier: GPL-3.0-only

//! Planting interval calibration
//!
//! Holds the spacing the seeder uses between plants in a row, the crop
//! presets, and the marker layout drawn in the calibration preview.

use serde::{Deserialize, Serialize};

/// Smallest supported interval (cm)
pub const MIN_SPACING_CM: u32 = 10;
/// Largest supported interval (cm)
pub const MAX_SPACING_CM: u32 = 100;
/// Slider step (cm)
pub const SPACING_STEP_CM: u32 = 5;
/// Interval restored by "Reset Default"
pub const DEFAULT_SPACING_CM: u32 = 45;
/// Crop restored by "Reset Default"
pub const DEFAULT_CROP: &str = "Corn";
/// Tick labels under the slider
pub const SCALE_TICKS_CM: [u32; 5] = [10, 25, 50, 75, 100];

/// Most markers drawn in the preview row
const MAX_MARKERS: usize = 5;

/// A named crop with its recommended interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropPreset {
    pub name: &'static str,
    pub spacing_cm: u32,
}

/// Built-in crop presets
pub const CROP_PRESETS: [CropPreset; 4] = [
    CropPreset {
        name: "Corn",
        spacing_cm: 45,
    },
    CropPreset {
        name: "Wheat",
        spacing_cm: 15,
    },
    CropPreset {
        name: "Soy",
        spacing_cm: 30,
    },
    CropPreset {
        name: "Potato",
        spacing_cm: 35,
    },
];

/// Look up a preset by name (case-insensitive)
pub fn find_preset(name: &str) -> Option<CropPreset> {
    CROP_PRESETS
        .iter()
        .copied()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Clamp to range and snap to the nearest slider step
pub fn snap_spacing(cm: u32) -> u32 {
    let clamped = cm.clamp(MIN_SPACING_CM, MAX_SPACING_CM);
    let offset = clamped - MIN_SPACING_CM;
    let snapped = ((offset + SPACING_STEP_CM / 2) / SPACING_STEP_CM) * SPACING_STEP_CM;
    (MIN_SPACING_CM + snapped).min(MAX_SPACING_CM)
}

/// Current calibration state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpacingCalibration {
    spacing_cm: u32,
    active_crop: Option<&'static str>,
}

impl Default for SpacingCalibration {
    fn default() -> Self {
        Self {
            spacing_cm: DEFAULT_SPACING_CM,
            active_crop: Some(DEFAULT_CROP),
        }
    }
}

impl SpacingCalibration {
    /// Restore a saved calibration. Unknown crops are dropped.
    pub fn restore(spacing_cm: u32, crop: Option<&str>) -> Self {
        let spacing_cm = snap_spacing(spacing_cm);
        let active_crop = crop
            .and_then(find_preset)
            .filter(|p| p.spacing_cm == spacing_cm)
            .map(|p| p.name);
        Self {
            spacing_cm,
            active_crop,
        }
    }

    pub fn spacing_cm(&self) -> u32 {
        self.spacing_cm
    }

    pub fn active_crop(&self) -> Option<&'static str> {
        self.active_crop
    }

    /// Apply a crop preset
    pub fn select_preset(&mut self, preset: CropPreset) {
        self.spacing_cm = preset.spacing_cm;
        self.active_crop = Some(preset.name);
    }

    /// Manual slider change. Any manual value detaches from the preset.
    pub fn set_spacing(&mut self, cm: u32) {
        self.spacing_cm = snap_spacing(cm);
        self.active_crop = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn layout(&self) -> PlantLayout {
        PlantLayout::for_spacing(self.spacing_cm)
    }
}

/// Marker positions for the preview row
#[derive(Debug, Clone, PartialEq)]
pub struct PlantLayout {
    /// Plants that fit in a one-metre row
    pub plant_count: usize,
    /// Marker offsets in percent of the row width; the last one is the next plant
    pub positions: Vec<f32>,
}

impl PlantLayout {
    pub fn for_spacing(spacing_cm: u32) -> Self {
        let spacing = spacing_cm.max(1) as f32;
        let plant_count = ((100 / spacing_cm.max(1)) as usize + 1).max(2);

        let total_width = (plant_count - 1) as f32 * spacing;
        let start = (100.0 - total_width.min(80.0)) / 2.0;
        let step = (spacing * 0.8).min(20.0);

        let positions = (0..plant_count.min(MAX_MARKERS))
            .map(|i| start + i as f32 * step)
            .collect();

        Self {
            plant_count,
            positions,
        }
    }

    /// Gap in pixels drawn between two markers
    pub fn marker_gap(spacing_cm: u32) -> f32 {
        spacing_cm as f32 * 0.8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_spacing() {
        assert_eq!(snap_spacing(0), 10);
        assert_eq!(snap_spacing(12), 10);
        assert_eq!(snap_spacing(13), 15);
        assert_eq!(snap_spacing(47), 45);
        assert_eq!(snap_spacing(48), 50);
        assert_eq!(snap_spacing(250), 100);
    }

    #[test]
    fn test_preset_then_manual_clears_crop() {
        let mut cal = SpacingCalibration::default();
        cal.select_preset(find_preset("wheat").unwrap());
        assert_eq!(cal.spacing_cm(), 15);
        assert_eq!(cal.active_crop(), Some("Wheat"));

        cal.set_spacing(62);
        assert_eq!(cal.spacing_cm(), 60);
        assert_eq!(cal.active_crop(), None);

        cal.reset();
        assert_eq!(cal, SpacingCalibration::default());
    }

    #[test]
    fn test_restore_drops_mismatched_crop() {
        let cal = SpacingCalibration::restore(30, Some("Corn"));
        assert_eq!(cal.spacing_cm(), 30);
        assert_eq!(cal.active_crop(), None);

        let cal = SpacingCalibration::restore(30, Some("Soy"));
        assert_eq!(cal.active_crop(), Some("Soy"));
    }

    #[test]
    fn test_layout_corn() {
        // 100 / 45 = 2 -> 3 plants; total 90 capped at 80 -> start 10; step min(36, 20)
        let layout = PlantLayout::for_spacing(45);
        assert_eq!(layout.plant_count, 3);
        assert_eq!(layout.positions, vec![10.0, 30.0, 50.0]);
    }

    #[test]
    fn test_layout_caps_markers() {
        let layout = PlantLayout::for_spacing(10);
        assert_eq!(layout.plant_count, 11);
        assert_eq!(layout.positions.len(), 5);
        // step = 8
        assert_eq!(layout.positions[0], 10.0);
        assert_eq!(layout.positions[4], 42.0);
    }

    #[test]
    fn test_layout_wide_spacing_keeps_two_plants() {
        let layout = PlantLayout::for_spacing(100);
        assert_eq!(layout.plant_count, 2);
        assert_eq!(layout.positions, vec![10.0, 30.0]);
    }
}
