// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::app::frame_processor::{Detection, WeedDetector};
use crate::backends::camera::CameraProvider;
use crate::backends::camera::types::{CameraDevice, CameraFrame};
use crate::capture::{CaptureFlow, Handoff, ImageAsset, MediaStreamHandle, Ticket};
use crate::config::Config;
use crate::errors::{AcquisitionFailure, FileReadError};
use crate::fl;
use crate::planting::SpacingCalibration;
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use cosmic::widget::{image, nav_bar};
use std::path::PathBuf;
use std::sync::Arc;

/// Pages reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Planting,
    Weeding,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Dashboard, Page::Planting, Page::Weeding];

    pub fn title(&self) -> String {
        match self {
            Page::Dashboard => fl!("page-dashboard"),
            Page::Planting => fl!("page-planting"),
            Page::Weeding => fl!("page-weeding"),
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Page::Dashboard => "view-grid-symbolic",
            Page::Planting => "list-add-symbolic",
            Page::Weeding => "camera-photo-symbolic",
        }
    }
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Outcome of the last "Generate Report" action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    Saved(PathBuf),
    Failed(String),
}

/// The application model stores app-specific state used to describe its
/// interface and drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,
    /// Sidebar navigation
    pub nav: nav_bar::Model,
    /// Weeding page controller
    pub capture: CaptureFlow,
    /// Camera source used by the weeding page
    pub camera_provider: Arc<dyn CameraProvider>,
    /// Detector used for scans
    pub detector: Arc<dyn WeedDetector>,
    /// Frame shown on the weeding page, with detection boxes drawn in
    pub display: Option<image::Handle>,
    /// Planting calibration being edited
    pub planting: SpacingCalibration,
    /// Cameras found at startup (settings drawer)
    pub available_cameras: Vec<CameraDevice>,
    /// Dropdown labels: "Automatic" followed by every camera
    pub camera_dropdown_options: Vec<String>,
    /// Dropdown labels for the theme selector
    pub theme_dropdown_options: Vec<String>,
    /// Result of the last report generation
    pub report_status: Option<ReportStatus>,
}

/// Messages emitted by the application and its widgets.
///
/// Messages are organized into logical groups:
/// - **UI Navigation**: context drawer, sidebar pages, external links
/// - **Weeding**: capture flow intents and their completions
/// - **Planting**: spacing calibration
/// - **Settings**: configuration updates
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page (About, Settings)
    ToggleContextPage(ContextPage),
    /// Switch page from an in-page link
    Navigate(Page),

    // ===== Weeding =====
    /// Ask for the field camera
    RequestCamera,
    /// Camera acquisition finished
    CameraAcquired(Ticket, Result<Handoff<MediaStreamHandle>, AcquisitionFailure>),
    /// Open the image picker
    SelectImage,
    /// Image picking and decoding finished
    ImageRead(Ticket, Result<ImageAsset, FileReadError>),
    /// Scan the current input
    Scan,
    /// Detector returned
    ScanCompleted(Ticket, Vec<Detection>),
    /// Stop the camera or discard the image
    CloseCapture,
    /// Dismiss the camera notice
    DismissNotice,
    /// New preview frame from the stream with this id
    PreviewFrame(u64, Arc<CameraFrame>),
    /// Write a scan report
    GenerateReport,
    /// Report written (path) or failed (message)
    ReportSaved(Result<PathBuf, String>),
    /// Open the report directory in the file manager
    OpenReportFolder,
    /// Refresh relative detection ages
    Tick,

    // ===== Planting =====
    /// Apply crop preset by index
    SelectCropPreset(usize),
    /// Slider moved
    SetSpacing(u32),
    /// Back to 45 cm / Corn
    ResetPlanting,
    /// Persist spacing and crop
    SavePlanting,

    // ===== Settings =====
    /// Configuration changed on disk
    UpdateConfig(Config),
    /// Theme dropdown
    SetAppTheme(usize),
    /// Camera dropdown (0 = automatic)
    SelectCameraDevice(usize),
    /// Startup enumeration finished
    CamerasEnumerated(Vec<CameraDevice>),
}
