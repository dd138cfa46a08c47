// SPDX-License-Identifier: GPL-3.0-only

//! Capture flow controller for the weed-detection page
//!
//! The controller sequences camera acquisition, still-image selection and
//! scanning:
//!
//! ```text
//!             request_camera                 ok
//!   ┌──────┐ ───────────────> AcquiringCamera ───> LiveCamera ──┐
//!   │ Idle │ <─────────────── (failure: notice)                  │ close
//!   └──────┘ <───────────────────────────────────────────────────┘
//!      │  ▲
//!      │  │ close
//!      ▼  │
//!   StillImage <── select_file (replaces the asset)
//! ```
//!
//! It never performs I/O itself. Each asynchronous step (acquire, read,
//! detect) is started by the caller with a [`Ticket`] issued here and
//! finished by handing the result back with the same ticket. Completions
//! whose ticket is no longer current are ignored, and a late camera stream
//! is released on arrival, so closing or tearing down at any point leaves
//! no device open.

pub mod stream;
pub mod types;

pub use stream::{Handoff, MediaStreamHandle, MediaTrack, PreviewReceiver, PreviewSender};
pub use types::{CaptureMode, ImageAsset, ScanRequest, ScanStats, Ticket};

use crate::app::frame_processor::Detection;
use crate::backends::camera::types::CameraFrame;
use crate::errors::{AcquisitionFailure, CaptureError, FileReadError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Tickets are unique per process so a completion addressed to a replaced
/// controller can never match the current one
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Internal state; resources live inside the variant that owns them
enum CaptureState {
    Idle,
    AcquiringCamera { ticket: Ticket },
    LiveCamera { stream: MediaStreamHandle },
    StillImage { asset: ImageAsset },
}

impl CaptureState {
    fn name(&self) -> &'static str {
        match self {
            CaptureState::Idle => "Idle",
            CaptureState::AcquiringCamera { .. } => "AcquiringCamera",
            CaptureState::LiveCamera { .. } => "LiveCamera",
            CaptureState::StillImage { .. } => "StillImage",
        }
    }
}

/// Capture flow state machine
pub struct CaptureFlow {
    state: CaptureState,
    scanning: Option<Ticket>,
    pending_read: Option<Ticket>,
    detections: Vec<Detection>,
    detections_visible: bool,
    notice: Option<CaptureError>,
    stats: ScanStats,
    torn_down: bool,
}

impl Default for CaptureFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureFlow {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            scanning: None,
            pending_read: None,
            detections: Vec::new(),
            detections_visible: false,
            notice: None,
            stats: ScanStats::default(),
            torn_down: false,
        }
    }

    // ===== Queries =====

    pub fn mode(&self) -> CaptureMode {
        match self.state {
            CaptureState::Idle | CaptureState::AcquiringCamera { .. } => CaptureMode::Idle,
            CaptureState::LiveCamera { .. } => CaptureMode::LiveCamera,
            CaptureState::StillImage { .. } => CaptureMode::StillImage,
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning.is_some()
    }

    /// A camera permission/device request is outstanding
    pub fn is_acquiring(&self) -> bool {
        matches!(self.state, CaptureState::AcquiringCamera { .. })
    }

    /// A file read is outstanding
    pub fn is_reading_file(&self) -> bool {
        self.pending_read.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn stream(&self) -> Option<&MediaStreamHandle> {
        match &self.state {
            CaptureState::LiveCamera { stream } => Some(stream),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&ImageAsset> {
        match &self.state {
            CaptureState::StillImage { asset } => Some(asset),
            _ => None,
        }
    }

    /// The frame currently on screen: latest camera frame or the still image
    pub fn current_frame(&self) -> Option<Arc<CameraFrame>> {
        match &self.state {
            CaptureState::LiveCamera { stream } => stream.latest_frame(),
            CaptureState::StillImage { asset } => Some(Arc::clone(&asset.frame)),
            _ => None,
        }
    }

    /// Detections from the last completed scan, empty while hidden
    pub fn detections(&self) -> &[Detection] {
        if self.detections_visible {
            &self.detections
        } else {
            &[]
        }
    }

    /// Pending user notice (camera failures)
    pub fn notice(&self) -> Option<&CaptureError> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Description of the current input for reports
    pub fn source_label(&self) -> Option<String> {
        match &self.state {
            CaptureState::LiveCamera { stream } => Some(format!("camera: {}", stream.device_name())),
            CaptureState::StillImage { asset } => Some(format!("image: {}", asset.name)),
            _ => None,
        }
    }

    // ===== Intents =====

    /// Whether [`request_camera`](Self::request_camera) would start an acquisition
    pub fn can_request_camera(&self) -> bool {
        !self.torn_down && !self.is_reading_file() && matches!(self.state, CaptureState::Idle)
    }

    /// Whether [`begin_file_read`](Self::begin_file_read) would start a read
    pub fn can_select_file(&self) -> bool {
        !self.torn_down
            && !self.is_reading_file()
            && !self.is_scanning()
            && matches!(
                self.state,
                CaptureState::Idle | CaptureState::StillImage { .. }
            )
    }

    /// Start a camera acquisition. Returns None when not allowed right now.
    pub fn request_camera(&mut self) -> Option<Ticket> {
        if !self.can_request_camera() {
            debug!(state = self.state.name(), "Camera request ignored");
            return None;
        }

        let ticket = self.issue_ticket();
        self.notice = None;
        self.state = CaptureState::AcquiringCamera { ticket };
        info!(ticket = ticket.0, "Requesting camera");
        Some(ticket)
    }

    /// Finish a camera acquisition started with [`request_camera`](Self::request_camera)
    pub fn complete_camera_request(
        &mut self,
        ticket: Ticket,
        result: Result<MediaStreamHandle, AcquisitionFailure>,
    ) {
        let current = !self.torn_down
            && matches!(self.state, CaptureState::AcquiringCamera { ticket: t } if t == ticket);

        if !current {
            match result {
                Ok(stream) => {
                    warn!(
                        ticket = ticket.0,
                        device = stream.device_name(),
                        "Camera arrived for an abandoned request, releasing"
                    );
                    stream.release();
                }
                Err(reason) => {
                    debug!(ticket = ticket.0, %reason, "Ignoring stale camera failure");
                }
            }
            return;
        }

        match result {
            Ok(stream) => {
                info!(device = stream.device_name(), stream = stream.id(), "Live camera active");
                self.state = CaptureState::LiveCamera { stream };
            }
            Err(reason) => {
                warn!(%reason, "Camera unavailable");
                self.state = CaptureState::Idle;
                self.notice = Some(reason.into());
            }
        }
    }

    /// Start reading a still image. Allowed from Idle or StillImage.
    pub fn begin_file_read(&mut self) -> Option<Ticket> {
        if !self.can_select_file() {
            debug!(state = self.state.name(), "File selection ignored");
            return None;
        }

        let ticket = self.issue_ticket();
        self.pending_read = Some(ticket);
        debug!(ticket = ticket.0, "Reading still image");
        Some(ticket)
    }

    /// Finish a read started with [`begin_file_read`](Self::begin_file_read)
    ///
    /// On success the new asset replaces any previous one. Failures leave
    /// the state untouched.
    pub fn complete_file_read(&mut self, ticket: Ticket, result: Result<ImageAsset, FileReadError>) {
        if self.torn_down || self.pending_read != Some(ticket) {
            debug!(ticket = ticket.0, "Ignoring stale file read");
            return;
        }
        self.pending_read = None;

        match result {
            Ok(asset) => {
                if let CaptureState::StillImage { asset: previous } = &self.state {
                    debug!(previous = %previous.name, "Replacing still image");
                }
                info!(
                    name = %asset.name,
                    mime = asset.mime,
                    width = asset.frame.width,
                    height = asset.frame.height,
                    "Still image loaded"
                );
                self.state = CaptureState::StillImage { asset };
                self.hide_detections();
            }
            Err(FileReadError::Cancelled) => {
                debug!("Image selection cancelled");
            }
            Err(err) => {
                warn!(error = %err, "Image read failed, keeping current state");
            }
        }
    }

    /// Start a scan of the current input. No-op in Idle or while busy.
    pub fn scan(&mut self) -> Option<ScanRequest> {
        if self.torn_down || self.is_scanning() || self.is_reading_file() {
            return None;
        }
        let frame = match &self.state {
            CaptureState::LiveCamera { stream } => stream.latest_frame(),
            CaptureState::StillImage { asset } => Some(Arc::clone(&asset.frame)),
            _ => return None,
        };

        let ticket = self.issue_ticket();
        self.scanning = Some(ticket);
        self.detections_visible = false;
        info!(ticket = ticket.0, has_frame = frame.is_some(), "Scan started");
        Some(ScanRequest { ticket, frame })
    }

    /// Finish a scan; the detections become visible
    pub fn complete_scan(&mut self, ticket: Ticket, detections: Vec<Detection>) {
        if self.torn_down || self.scanning != Some(ticket) {
            debug!(ticket = ticket.0, "Ignoring stale scan result");
            return;
        }
        self.scanning = None;
        self.stats.record(detections.len() as u32);
        info!(count = detections.len(), "Scan complete");
        self.detections = detections;
        self.detections_visible = true;
    }

    /// Return to Idle, releasing whatever is held
    pub fn close(&mut self) {
        match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::LiveCamera { stream } => stream.release(),
            CaptureState::StillImage { asset } => {
                debug!(name = %asset.name, "Discarding still image");
            }
            CaptureState::AcquiringCamera { ticket } => {
                info!(ticket = ticket.0, "Abandoning pending camera request");
            }
            CaptureState::Idle => {}
        }
        self.scanning = None;
        self.pending_read = None;
        self.hide_detections();
    }

    /// Release everything; every later completion is ignored
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.close();
        self.notice = None;
        self.torn_down = true;
        debug!("Capture flow torn down");
    }

    fn issue_ticket(&self) -> Ticket {
        Ticket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }

    fn hide_detections(&mut self) {
        self.detections.clear();
        self.detections_visible = false;
    }
}

impl Drop for CaptureFlow {
    fn drop(&mut self) {
        self.teardown();
    }
}
