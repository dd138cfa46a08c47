// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use agribot::Config;
use agribot::config::AppTheme;
use agribot::planting::{DEFAULT_CROP, DEFAULT_SPACING_CM};
use std::path::PathBuf;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.app_theme, AppTheme::System);
    assert_eq!(config.camera_device, None, "Camera should be picked automatically");
    assert_eq!(config.planting_spacing_cm, DEFAULT_SPACING_CM);
    assert_eq!(config.planting_crop.as_deref(), Some(DEFAULT_CROP));
}

#[test]
fn test_report_dir_override() {
    let config = Config {
        report_directory: Some("/srv/field/reports".to_string()),
        ..Config::default()
    };
    assert_eq!(config.report_dir(), PathBuf::from("/srv/field/reports"));
}

#[test]
fn test_report_dir_default_is_app_folder() {
    let dir = Config::default().report_dir();
    assert!(dir.ends_with("agribot"), "unexpected report dir {}", dir.display());
}

#[test]
fn test_config_serde_roundtrip() {
    let config = Config {
        app_theme: AppTheme::Dark,
        camera_device: Some("/dev/video2".to_string()),
        planting_spacing_cm: 30,
        planting_crop: Some("Soy".to_string()),
        report_directory: None,
    };
    let json = serde_json::to_string(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}
