// SPDX-License-Identifier: GPL-3.0-only

use crate::planting::{DEFAULT_CROP, DEFAULT_SPACING_CM};
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::{Theme, theme};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application theme preference
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AppTheme {
    /// Follow system theme (dark or light based on system setting)
    #[default]
    System,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl AppTheme {
    pub const ALL: [AppTheme; 3] = [AppTheme::System, AppTheme::Dark, AppTheme::Light];

    /// Get the COSMIC theme for this app theme preference
    pub fn theme(&self) -> Theme {
        match self {
            Self::Dark => {
                let mut theme = theme::system_dark();
                theme.theme_type.prefer_dark(Some(true));
                theme
            }
            Self::Light => {
                let mut theme = theme::system_light();
                theme.theme_type.prefer_dark(Some(false));
                theme
            }
            Self::System => theme::system_preference(),
        }
    }
}

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Application theme preference (System, Dark, Light)
    pub app_theme: AppTheme,
    /// Camera device to use for live scans (None = pick the field-facing one)
    pub camera_device: Option<String>,
    /// Saved planting interval in centimetres
    pub planting_spacing_cm: u32,
    /// Crop preset the saved interval came from, if any
    pub planting_crop: Option<String>,
    /// Where scan reports are written (None = ~/Documents/agribot)
    pub report_directory: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_theme: AppTheme::default(),
            camera_device: None,
            planting_spacing_cm: DEFAULT_SPACING_CM,
            planting_crop: Some(DEFAULT_CROP.to_string()),
            report_directory: None,
        }
    }
}

impl Config {
    /// Resolved report directory
    pub fn report_dir(&self) -> PathBuf {
        self.report_directory
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(crate::storage::default_report_directory)
    }
}
