// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 camera provider
//!
//! Each acquired stream owns one capture thread that opens the device,
//! negotiates MJPG (or YUYV as a fallback), and publishes RGBA frames to a
//! watch channel. The thread reports readiness after the first frame so
//! acquisition failures surface as [`AcquisitionFailure`] values instead of
//! a blank preview.

use super::format_converters::{FOURCC_MJPG, FOURCC_YUYV, buffer_to_frame};
use super::types::*;
use super::{CameraProvider, classify_io_error, select_device};
use crate::capture::{MediaStreamHandle, MediaTrack, PreviewSender};
use crate::constants::capture::{CAMERA_START_TIMEOUT, FRAME_LOG_INTERVAL, STREAM_BUFFERS};
use crate::errors::AcquisitionFailure;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{RecvTimeoutError, SyncSender};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use v4l::buffer::Type;
use v4l::capability::Flags;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;
use v4l::FourCC;

/// How long one blocking dequeue may wait before the running flag is rechecked
const DEQUEUE_TIMEOUT: Duration = Duration::from_millis(500);

/// Consecutive dequeue failures after which the device is considered gone
const MAX_CONSECUTIVE_ERRORS: u32 = 50;

/// Camera provider backed by `/dev/video*` nodes
#[derive(Debug, Default, Clone)]
pub struct V4l2Provider;

impl V4l2Provider {
    pub fn new() -> Self {
        Self
    }
}

impl CameraProvider for V4l2Provider {
    fn enumerate(&self) -> Vec<CameraDevice> {
        let mut nodes = v4l::context::enum_devices();
        nodes.sort_by_key(|node| node.index());

        nodes
            .into_iter()
            .filter_map(|node| {
                let path = node.path().to_string_lossy().into_owned();
                let fallback_name = node.name().unwrap_or_else(|| path.clone());

                // Nodes we cannot open are still listed so that acquisition
                // reports the real error (permission, busy)
                let caps = match Device::with_path(&path).and_then(|dev| dev.query_caps()) {
                    Ok(caps) => caps,
                    Err(e) => {
                        debug!(path = %path, error = %e, "Could not query device");
                        return Some(CameraDevice {
                            name: fallback_name,
                            path,
                            driver: None,
                        });
                    }
                };

                // UVC cameras expose a metadata node next to the capture node
                if !caps.capabilities.contains(Flags::VIDEO_CAPTURE) {
                    debug!(path = %path, "Skipping non-capture node");
                    return None;
                }

                Some(CameraDevice {
                    name: caps.card,
                    path,
                    driver: Some(caps.driver),
                })
            })
            .collect()
    }

    fn acquire(&self, request: &CameraRequest) -> Result<MediaStreamHandle, AcquisitionFailure> {
        let devices = self.enumerate();
        let device = select_device(&devices, request)
            .cloned()
            .ok_or(AcquisitionFailure::NoDevice)?;

        info!(
            name = %device.name,
            path = %device.path,
            width = request.width,
            height = request.height,
            "Acquiring camera"
        );

        let (preview_tx, preview_rx) = watch::channel(None);
        let (ready_tx, ready_rx) = std::sync::mpsc::sync_channel(1);
        let running = Arc::new(AtomicBool::new(true));

        let thread = {
            let running = Arc::clone(&running);
            let path = device.path.clone();
            let (width, height) = (request.width, request.height);
            std::thread::Builder::new()
                .name("v4l2-capture".to_string())
                .spawn(move || {
                    if let Err(e) = capture_loop(&path, width, height, &ready_tx, preview_tx, &running)
                    {
                        // Only reaches the caller if readiness was not reported yet
                        let _ = ready_tx.try_send(Err(e));
                    }
                    running.store(false, Ordering::SeqCst);
                })
                .map_err(|e| {
                    error!(error = %e, "Failed to spawn capture thread");
                    AcquisitionFailure::DeviceBusy
                })?
        };

        let mut track = V4l2Track {
            label: device.path.clone(),
            running,
            thread: Some(thread),
        };

        match ready_rx.recv_timeout(CAMERA_START_TIMEOUT) {
            Ok(Ok(fourcc)) => {
                info!(path = %device.path, format = %fourcc, "Camera streaming");
                Ok(MediaStreamHandle::new(
                    device.name,
                    vec![Box::new(track)],
                    Some(preview_rx),
                ))
            }
            Ok(Err(e)) => {
                track.stop();
                let reason = classify_io_error(&e);
                warn!(path = %device.path, error = %e, %reason, "Camera acquisition failed");
                Err(reason)
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(path = %device.path, "Camera did not deliver a frame in time");
                track.abandon();
                Err(AcquisitionFailure::DeviceBusy)
            }
            Err(RecvTimeoutError::Disconnected) => {
                track.stop();
                Err(AcquisitionFailure::NoDevice)
            }
        }
    }
}

/// Capture thread of one acquired stream
struct V4l2Track {
    label: String,
    running: Arc<AtomicBool>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl V4l2Track {
    /// Signal the thread to stop without waiting for it
    fn abandon(mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.thread.take();
    }
}

impl MediaTrack for V4l2Track {
    fn label(&self) -> &str {
        &self.label
    }

    fn is_live(&self) -> bool {
        self.running.load(Ordering::SeqCst)
            && self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Signals the capture thread and joins it on a blocking task. The thread
    /// notices the flag within one `DEQUEUE_TIMEOUT`.
    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        let Some(handle) = self.thread.take() else {
            return;
        };

        let label = self.label.clone();
        let join = move || match handle.join() {
            Ok(()) => debug!(track = %label, "Capture thread stopped"),
            Err(_) => warn!(track = %label, "Capture thread panicked"),
        };

        // Outside a runtime (CLI) the join happens inline
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn_blocking(join);
            }
            Err(_) => join(),
        }
    }
}

impl Drop for V4l2Track {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Negotiate a format the converters understand
fn negotiate_format(dev: &Device, width: u32, height: u32) -> io::Result<v4l::Format> {
    let mut format = dev.format()?;
    format.width = width;
    format.height = height;

    for fourcc in [FOURCC_MJPG, FOURCC_YUYV] {
        format.fourcc = FourCC::new(&fourcc);
        let applied = dev.set_format(&format)?;
        if applied.fourcc.repr == fourcc {
            return Ok(applied);
        }
        debug!(wanted = %format.fourcc, got = %applied.fourcc, "Format not accepted");
    }

    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "device offers neither MJPG nor YUYV",
    ))
}

/// Runs on the capture thread until `running` is cleared
fn capture_loop(
    device_path: &str,
    width: u32,
    height: u32,
    ready: &SyncSender<io::Result<FourCC>>,
    preview: PreviewSender,
    running: &AtomicBool,
) -> io::Result<()> {
    let dev = Device::with_path(device_path)?;
    let format = negotiate_format(&dev, width, height)?;
    info!(
        device_path,
        width = format.width,
        height = format.height,
        fourcc = %format.fourcc,
        "Set V4L2 format"
    );

    let mut stream = MmapStream::with_buffers(&dev, Type::VideoCapture, STREAM_BUFFERS)?;
    stream.set_timeout(DEQUEUE_TIMEOUT);

    // First frame proves the device actually streams
    let started = Instant::now();
    let first = loop {
        match stream.next() {
            Ok((buf, _)) => {
                break buffer_to_frame(format.fourcc.repr, buf, format.width, format.height)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
            }
            Err(e)
                if e.kind() == io::ErrorKind::TimedOut
                    && started.elapsed() < CAMERA_START_TIMEOUT
                    && running.load(Ordering::SeqCst) => {}
            Err(e) => return Err(e),
        }
    };
    preview.send_replace(Some(Arc::new(first)));
    let _ = ready.try_send(Ok(format.fourcc));

    let mut frame_num: u64 = 1;
    let mut consecutive_errors = 0;
    while running.load(Ordering::SeqCst) {
        match stream.next() {
            Ok((buf, meta)) => {
                consecutive_errors = 0;
                frame_num += 1;
                match buffer_to_frame(format.fourcc.repr, buf, format.width, format.height) {
                    Ok(frame) => {
                        preview.send_replace(Some(Arc::new(frame)));
                        if frame_num % FRAME_LOG_INTERVAL == 0 {
                            debug!(
                                frame = frame_num,
                                sequence = meta.sequence,
                                size = buf.len(),
                                "Camera frame captured"
                            );
                        }
                    }
                    Err(e) => {
                        if frame_num % FRAME_LOG_INTERVAL == 0 {
                            warn!(frame = frame_num, error = %e, "Dropping undecodable frame");
                        }
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {}
            Err(e) => {
                consecutive_errors += 1;
                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    error!(device_path, error = %e, "Camera stopped responding");
                    return Err(e);
                }
                warn!(error = %e, "Failed to capture frame");
                std::thread::sleep(Duration::from_millis(10));
            }
        }
    }

    info!(device_path, frames = frame_num, "V4L2 capture loop ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Track whose thread lingers like a capture loop blocked in a dequeue
    fn lingering_track(linger: Duration) -> (V4l2Track, Arc<AtomicBool>) {
        let running = Arc::new(AtomicBool::new(true));
        let finished = Arc::new(AtomicBool::new(false));
        let thread = {
            let running = Arc::clone(&running);
            let finished = Arc::clone(&finished);
            std::thread::spawn(move || {
                while running.load(Ordering::SeqCst) {
                    std::thread::sleep(Duration::from_millis(5));
                }
                std::thread::sleep(linger);
                finished.store(true, Ordering::SeqCst);
            })
        };
        let track = V4l2Track {
            label: "/dev/video-test".to_string(),
            running,
            thread: Some(thread),
        };
        (track, finished)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_stop_does_not_wait_for_capture_thread() {
        let (mut track, finished) = lingering_track(Duration::from_millis(400));
        assert!(track.is_live());

        let started = Instant::now();
        track.stop();
        assert!(started.elapsed() < Duration::from_millis(200));
        assert!(!track.is_live());

        // Idempotent
        track.stop();

        tokio::time::sleep(Duration::from_millis(800)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[test]
    fn test_stop_without_runtime_joins() {
        let (mut track, finished) = lingering_track(Duration::from_millis(20));
        track.stop();
        assert!(finished.load(Ordering::SeqCst));
        assert!(!track.is_live());
    }
}
