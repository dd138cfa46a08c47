// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the planting calibration

use agribot::planting::{
    CROP_PRESETS, DEFAULT_SPACING_CM, MAX_SPACING_CM, MIN_SPACING_CM, PlantLayout,
    SCALE_TICKS_CM, SPACING_STEP_CM, SpacingCalibration, find_preset,
};

#[test]
fn test_presets_within_slider_range() {
    for preset in CROP_PRESETS {
        assert!(
            (MIN_SPACING_CM..=MAX_SPACING_CM).contains(&preset.spacing_cm),
            "Preset {} out of range",
            preset.name
        );
        assert_eq!(
            (preset.spacing_cm - MIN_SPACING_CM) % SPACING_STEP_CM,
            0,
            "Preset {} not on a slider step",
            preset.name
        );
    }
}

#[test]
fn test_scale_ticks_span_range() {
    assert_eq!(SCALE_TICKS_CM.first(), Some(&MIN_SPACING_CM));
    assert_eq!(SCALE_TICKS_CM.last(), Some(&MAX_SPACING_CM));
    assert!(SCALE_TICKS_CM.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_default_matches_corn() {
    let cal = SpacingCalibration::default();
    let corn = find_preset("corn").unwrap();
    assert_eq!(cal.spacing_cm(), DEFAULT_SPACING_CM);
    assert_eq!(cal.spacing_cm(), corn.spacing_cm);
    assert_eq!(cal.active_crop(), Some(corn.name));
}

#[test]
fn test_manual_spacing_is_snapped_and_clamped() {
    let mut cal = SpacingCalibration::default();

    cal.set_spacing(3);
    assert_eq!(cal.spacing_cm(), MIN_SPACING_CM);

    cal.set_spacing(1000);
    assert_eq!(cal.spacing_cm(), MAX_SPACING_CM);

    cal.set_spacing(33);
    assert_eq!(cal.spacing_cm(), 35);
    assert_eq!(cal.active_crop(), None);
}

#[test]
fn test_layout_dense_rows_are_capped() {
    let layout = PlantLayout::for_spacing(MIN_SPACING_CM);
    assert_eq!(layout.plant_count, 11);
    assert_eq!(layout.positions.len(), 5);
}

#[test]
fn test_layout_sparse_rows_have_two_plants() {
    let layout = PlantLayout::for_spacing(MAX_SPACING_CM);
    assert_eq!(layout.plant_count, 2);
    assert_eq!(layout.positions.len(), 2);
    assert!(layout.positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_unknown_preset() {
    assert!(find_preset("Banana").is_none());
}
