// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher, while specific handlers
//! are implemented in the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::capture`: Weeding page capture flow, scans and reports
//! - `handlers::planting`: Spacing calibration
//! - `handlers::system`: Navigation, settings, external URLs

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::Navigate(page) => self.handle_navigate(page),

            // ===== Weeding =====
            Message::RequestCamera => self.handle_request_camera(),
            Message::CameraAcquired(ticket, result) => self.handle_camera_acquired(ticket, result),
            Message::SelectImage => self.handle_select_image(),
            Message::ImageRead(ticket, result) => self.handle_image_read(ticket, result),
            Message::Scan => self.handle_scan(),
            Message::ScanCompleted(ticket, detections) => {
                self.handle_scan_completed(ticket, detections)
            }
            Message::CloseCapture => self.handle_close_capture(),
            Message::DismissNotice => {
                self.capture.dismiss_notice();
                Task::none()
            }
            Message::PreviewFrame(stream_id, frame) => self.handle_preview_frame(stream_id, frame),
            Message::GenerateReport => self.handle_generate_report(),
            Message::ReportSaved(result) => self.handle_report_saved(result),
            Message::OpenReportFolder => self.handle_open_report_folder(),
            // Re-render only
            Message::Tick => Task::none(),

            // ===== Planting =====
            Message::SelectCropPreset(index) => self.handle_select_crop_preset(index),
            Message::SetSpacing(cm) => self.handle_set_spacing(cm),
            Message::ResetPlanting => self.handle_reset_planting(),
            Message::SavePlanting => self.handle_save_planting(),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
            Message::SelectCameraDevice(index) => self.handle_select_camera_device(index),
            Message::CamerasEnumerated(cameras) => self.handle_cameras_enumerated(cameras),
        }
    }
}
