// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the capture flow, driven the way the weeding page
//! and the `scan` command drive it

use agribot::backends::camera::types::CameraFrame;
use agribot::capture::{CaptureFlow, CaptureMode, ImageAsset, MediaStreamHandle, MediaTrack};
use agribot::errors::{AcquisitionFailure, CaptureError, FileReadError};
use agribot::report::ScanReport;
use agribot::{Detection, FrameRegion, SimulatedWeedDetector, WeedDetector};
use chrono::Local;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

struct StubTrack {
    stopped: Arc<AtomicBool>,
}

impl MediaTrack for StubTrack {
    fn label(&self) -> &str {
        "stub"
    }

    fn is_live(&self) -> bool {
        !self.stopped.load(Ordering::SeqCst)
    }

    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

fn stub_stream() -> (MediaStreamHandle, Arc<AtomicBool>) {
    let stopped = Arc::new(AtomicBool::new(false));
    let track = StubTrack {
        stopped: Arc::clone(&stopped),
    };
    (
        MediaStreamHandle::new("Field Cam", vec![Box::new(track)], None),
        stopped,
    )
}

fn still_image(name: &str) -> ImageAsset {
    let frame = CameraFrame::from_rgba(8, 6, vec![90; 8 * 6 * 4]).unwrap();
    ImageAsset {
        name: name.to_string(),
        mime: "image/png",
        encoded: Arc::from(vec![0u8; 4]),
        frame: Arc::new(frame),
    }
}

fn weed(id: u32) -> Detection {
    Detection::new(id, "Dandelion", 91, Local::now(), FrameRegion::new(0.1, 0.1, 0.2, 0.2))
}

#[test]
fn test_camera_then_close_releases_device() {
    let mut flow = CaptureFlow::new();
    let ticket = flow.request_camera().unwrap();
    assert!(flow.is_acquiring());
    assert_eq!(flow.mode(), CaptureMode::Idle);

    let (stream, stopped) = stub_stream();
    flow.complete_camera_request(ticket, Ok(stream));
    assert_eq!(flow.mode(), CaptureMode::LiveCamera);
    assert_eq!(flow.source_label().as_deref(), Some("camera: Field Cam"));

    flow.close();
    assert_eq!(flow.mode(), CaptureMode::Idle);
    assert!(stopped.load(Ordering::SeqCst));
}

#[test]
fn test_denied_camera_raises_notice() {
    let mut flow = CaptureFlow::new();
    let ticket = flow.request_camera().unwrap();
    flow.complete_camera_request(ticket, Err(AcquisitionFailure::PermissionDenied));

    assert_eq!(flow.mode(), CaptureMode::Idle);
    assert!(matches!(
        flow.notice(),
        Some(CaptureError::CameraUnavailable(AcquisitionFailure::PermissionDenied))
    ));

    // A new attempt clears the notice
    assert!(flow.request_camera().is_some());
    assert!(flow.notice().is_none());
}

#[test]
fn test_camera_after_close_is_released() {
    let mut flow = CaptureFlow::new();
    let ticket = flow.request_camera().unwrap();
    flow.close();

    let (stream, stopped) = stub_stream();
    flow.complete_camera_request(ticket, Ok(stream));
    assert_eq!(flow.mode(), CaptureMode::Idle);
    assert!(stopped.load(Ordering::SeqCst));
}

#[test]
fn test_dropping_flow_stops_live_camera() {
    let (stream, stopped) = stub_stream();
    {
        let mut flow = CaptureFlow::new();
        let ticket = flow.request_camera().unwrap();
        flow.complete_camera_request(ticket, Ok(stream));
        assert!(!stopped.load(Ordering::SeqCst));
    }
    assert!(stopped.load(Ordering::SeqCst));
}

#[test]
fn test_failed_read_keeps_previous_image() {
    let mut flow = CaptureFlow::new();
    let ticket = flow.begin_file_read().unwrap();
    flow.complete_file_read(ticket, Ok(still_image("row-1.png")));

    let ticket = flow.begin_file_read().unwrap();
    flow.complete_file_read(ticket, Err(FileReadError::UnsupportedFormat("not an image".into())));

    assert_eq!(flow.mode(), CaptureMode::StillImage);
    assert_eq!(flow.image().map(|a| a.name.as_str()), Some("row-1.png"));
}

#[test]
fn test_scan_results_reach_report() {
    let mut flow = CaptureFlow::new();
    let ticket = flow.begin_file_read().unwrap();
    flow.complete_file_read(ticket, Ok(still_image("row-2.png")));

    let first = flow.scan().unwrap();
    assert!(flow.is_scanning());
    assert!(flow.scan().is_none(), "Second scan while scanning");
    flow.complete_scan(first.ticket, vec![weed(1)]);

    let second = flow.scan().unwrap();
    assert!(flow.detections().is_empty(), "Old detections hidden during a scan");
    flow.complete_scan(second.ticket, vec![weed(1), weed(2), weed(3)]);

    let stats = flow.stats();
    assert_eq!(stats.scans, 2);
    assert_eq!(stats.total_weeds, 4);
    assert_eq!(stats.delta_from_last_scan(), Some(2));

    let report = ScanReport::from_flow(&flow);
    assert_eq!(report.source.as_deref(), Some("image: row-2.png"));
    assert_eq!(report.detections.len(), 3);
    let json = report.to_json().unwrap();
    assert!(json.contains("Dandelion"));
}

#[test]
fn test_scan_in_idle_does_nothing() {
    let mut flow = CaptureFlow::new();
    assert!(flow.scan().is_none());
    assert!(!flow.is_scanning());
}

#[tokio::test]
async fn test_simulated_detector_drives_flow() {
    let detector = SimulatedWeedDetector::with_delay(Duration::from_millis(1));
    let mut flow = CaptureFlow::new();
    let ticket = flow.begin_file_read().unwrap();
    flow.complete_file_read(ticket, Ok(still_image("row-3.png")));

    let request = flow.scan().unwrap();
    let detections = detector.detect(request.frame).await;
    flow.complete_scan(request.ticket, detections);

    assert!(!flow.is_scanning());
    assert_eq!(
        flow.detections().len(),
        SimulatedWeedDetector::canned_detections().len()
    );
}
