// SPDX-License-Identifier: MPL-2.0

//! AgriBot field console
//!
//! Dashboard for the AgriBot planting and weeding unit on the COSMIC
//! desktop: planting interval calibration and camera based weed detection.
//!
//! # Architecture
//!
//! - [`app`]: Application model, pages and message handling
//! - [`capture`]: Capture flow controller for the weeding page
//! - [`backends`]: V4L2 camera provider and image file source
//! - [`planting`]: Spacing calibration and crop presets
//! - [`report`]: Scan reports
//! - [`config`]: User configuration handling
//! - [`storage`]: Report storage
//!
//! # Example
//!
//! ```ignore
//! // This is a GUI application, typically run via:
//! // agribot
//! ```

pub mod app;
pub mod backends;
pub mod capture;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod planting;
pub mod report;
pub mod storage;

// Re-export commonly used types
pub use app::frame_processor::{Detection, FrameRegion, SimulatedWeedDetector, WeedDetector};
pub use app::{AppModel, Message, Page};
pub use capture::{CaptureFlow, CaptureMode};
pub use config::Config;
pub use report::ScanReport;
