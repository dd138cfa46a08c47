// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Capture flow timing and camera negotiation
pub mod capture {
    use super::Duration;

    /// How long a weed scan takes before detections are shown
    pub const SCAN_DURATION: Duration = Duration::from_secs(2);

    /// How long to wait for the first camera frame before giving up
    pub const CAMERA_START_TIMEOUT: Duration = Duration::from_secs(5);

    /// Requested capture width (the driver may pick the nearest size)
    pub const PREFERRED_WIDTH: u32 = 1280;

    /// Requested capture height
    pub const PREFERRED_HEIGHT: u32 = 720;

    /// Number of mmap buffers for the V4L2 stream
    pub const STREAM_BUFFERS: u32 = 4;

    /// Log a frame summary every N frames
    pub const FRAME_LOG_INTERVAL: u64 = 30;

    /// Device name fragments that suggest a rear (field-facing) camera
    pub const ENVIRONMENT_HINTS: &[&str] = &["back", "rear", "environment", "world", "field"];

    /// Device name fragments that suggest a user-facing camera
    pub const USER_HINTS: &[&str] = &["front", "user", "integrated", "facetime", "selfie"];
}

/// Dashboard content for the unit this console controls
pub mod robot {
    /// Unit name shown on the dashboard
    pub const NAME: &str = "EcoHarvester X1";

    /// Short model badge
    pub const MODEL: &str = "Model X1";

    /// Capability card: (title, detail)
    pub const CAPABILITIES: [(&str, &str); 3] = [
        ("Precision", "±2mm Accuracy"),
        ("Vision", "Object Detection"),
        ("Autonomy", "6h Continuous"),
    ];
}

/// Overlay and layout sizes
pub mod ui {
    /// Border width of detection boxes drawn onto frames (pixels)
    pub const DETECTION_BORDER_WIDTH: u32 = 3;

    /// Minimum edge of a drawn detection box (pixels)
    pub const MIN_DETECTION_BOX: u32 = 12;

    /// Width of the statistics column on the weeding page
    pub const STATS_PANEL_WIDTH: f32 = 320.0;

    /// Diameter of a plant marker in the spacing preview
    pub const PLANT_MARKER_SIZE: f32 = 56.0;

    /// Height of the spacing preview row
    pub const SPACING_PREVIEW_HEIGHT: f32 = 160.0;

    /// Maximum number of recent detections listed in the statistics panel
    pub const RECENT_DETECTIONS: usize = 5;
}

/// Supported file formats for the image picker
pub mod file_formats {
    /// Image file extensions offered by the picker
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];
}

/// Application information utilities
pub mod app_info {
    use std::path::Path;

    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Check if the application is running inside a Flatpak sandbox
    pub fn is_flatpak() -> bool {
        Path::new("/.flatpak-info").exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions_lowercase() {
        assert!(file_formats::IMAGE_EXTENSIONS.contains(&"jpg"));
        assert!(
            file_formats::IMAGE_EXTENSIONS
                .iter()
                .all(|ext| *ext == ext.to_ascii_lowercase())
        );
    }

    #[test]
    fn test_hint_lists_disjoint() {
        for hint in capture::ENVIRONMENT_HINTS {
            assert!(!capture::USER_HINTS.contains(hint));
        }
    }
}
