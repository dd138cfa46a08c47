// SPDX-License-Identifier: GPL-3.0-only

//! Weeding page handlers
//!
//! Turns button presses into capture flow intents, runs the asynchronous
//! half (camera acquisition, image reading, detection, report writing) as
//! tasks, and feeds the results back with the ticket they were issued for.

use crate::app::detection_overlay;
use crate::app::frame_processor::Detection;
use crate::app::state::{AppModel, Message, ReportStatus};
use crate::backends::camera::types::{CameraFrame, CameraRequest};
use crate::backends::file_source;
use crate::capture::{Handoff, ImageAsset, MediaStreamHandle, Ticket};
use crate::errors::{AcquisitionFailure, FileReadError};
use crate::fl;
use crate::report::ScanReport;
use cosmic::Task;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

impl AppModel {
    // =========================================================================
    // Capture Flow Handlers
    // =========================================================================

    pub(crate) fn handle_request_camera(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(ticket) = self.capture.request_camera() else {
            return Task::none();
        };

        let provider = Arc::clone(&self.camera_provider);
        let request = CameraRequest {
            device_path: self.config.camera_device.clone(),
            ..Default::default()
        };

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || provider.acquire(&request))
                    .await
                    .unwrap_or_else(|e| {
                        error!(error = %e, "Camera acquisition task failed");
                        Err(AcquisitionFailure::NoDevice)
                    })
            },
            move |result| {
                cosmic::Action::App(Message::CameraAcquired(ticket, result.map(Handoff::new)))
            },
        )
    }

    pub(crate) fn handle_camera_acquired(
        &mut self,
        ticket: Ticket,
        result: Result<Handoff<MediaStreamHandle>, AcquisitionFailure>,
    ) -> Task<cosmic::Action<Message>> {
        let result = match result {
            Ok(handoff) => match handoff.take() {
                Some(stream) => Ok(stream),
                None => {
                    warn!("Camera stream already claimed");
                    return Task::none();
                }
            },
            Err(reason) => Err(reason),
        };

        self.capture.complete_camera_request(ticket, result);
        self.refresh_display();
        Task::none()
    }

    pub(crate) fn handle_select_image(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(ticket) = self.capture.begin_file_read() else {
            return Task::none();
        };

        Task::perform(
            file_source::pick_and_read_image(fl!("select-image-title")),
            move |result| cosmic::Action::App(Message::ImageRead(ticket, result)),
        )
    }

    pub(crate) fn handle_image_read(
        &mut self,
        ticket: Ticket,
        result: Result<ImageAsset, FileReadError>,
    ) -> Task<cosmic::Action<Message>> {
        self.capture.complete_file_read(ticket, result);
        self.refresh_display();
        Task::none()
    }

    pub(crate) fn handle_scan(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(request) = self.capture.scan() else {
            return Task::none();
        };
        self.refresh_display();

        let ticket = request.ticket;
        Task::perform(self.detector.detect(request.frame), move |detections| {
            cosmic::Action::App(Message::ScanCompleted(ticket, detections))
        })
    }

    pub(crate) fn handle_scan_completed(
        &mut self,
        ticket: Ticket,
        detections: Vec<Detection>,
    ) -> Task<cosmic::Action<Message>> {
        self.capture.complete_scan(ticket, detections);
        self.refresh_display();
        Task::none()
    }

    pub(crate) fn handle_close_capture(&mut self) -> Task<cosmic::Action<Message>> {
        self.capture.close();
        self.display = None;
        Task::none()
    }

    pub(crate) fn handle_preview_frame(
        &mut self,
        stream_id: u64,
        frame: Arc<CameraFrame>,
    ) -> Task<cosmic::Action<Message>> {
        // Frames from a stream that was already released are dropped
        if self.capture.stream().map(|s| s.id()) != Some(stream_id) {
            debug!(stream = stream_id, "Dropping frame from inactive stream");
            return Task::none();
        }
        self.set_display_frame(&frame);
        Task::none()
    }

    /// Rebuild the displayed image from the controller's current input
    pub(crate) fn refresh_display(&mut self) {
        match self.capture.current_frame() {
            Some(frame) => self.set_display_frame(&frame),
            None => self.display = None,
        }
    }

    fn set_display_frame(&mut self, frame: &CameraFrame) {
        self.display = Some(detection_overlay::overlay_handle(
            frame,
            self.capture.detections(),
        ));
    }

    // =========================================================================
    // Report Handlers
    // =========================================================================

    pub(crate) fn handle_generate_report(&mut self) -> Task<cosmic::Action<Message>> {
        let report = ScanReport::from_flow(&self.capture);
        let dir = self.config.report_dir();
        info!(id = %report.id, dir = %dir.display(), "Generating scan report");

        Task::perform(
            async move {
                crate::storage::write_report(&dir, &report)
                    .await
                    .map_err(|e| e.to_string())
            },
            |result| cosmic::Action::App(Message::ReportSaved(result)),
        )
    }

    pub(crate) fn handle_report_saved(
        &mut self,
        result: Result<PathBuf, String>,
    ) -> Task<cosmic::Action<Message>> {
        self.report_status = Some(match result {
            Ok(path) => ReportStatus::Saved(path),
            Err(err) => {
                error!(error = %err, "Failed to save scan report");
                ReportStatus::Failed(err)
            }
        });
        Task::none()
    }

    pub(crate) fn handle_open_report_folder(&self) -> Task<cosmic::Action<Message>> {
        let dir = self.config.report_dir();
        if let Err(e) = open::that_detached(&dir) {
            error!(error = %e, path = %dir.display(), "Failed to open report directory");
        }
        Task::none()
    }
}
