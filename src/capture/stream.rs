// SPDX-License-Identifier: GPL-3.0-only

//! Live camera stream handles
//!
//! A [`MediaStreamHandle`] owns every track of an acquired camera. Tracks
//! are stopped on [`MediaStreamHandle::release`] and again on drop, so a
//! handle that falls out of scope never keeps the device open.

use crate::backends::camera::types::CameraFrame;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info};

/// Latest-frame channel published by a live track
pub type PreviewReceiver = watch::Receiver<Option<Arc<CameraFrame>>>;
/// Sending half of [`PreviewReceiver`]
pub type PreviewSender = watch::Sender<Option<Arc<CameraFrame>>>;

static NEXT_STREAM_ID: AtomicU64 = AtomicU64::new(1);

/// One media track of a stream (a capture thread, a device handle, ...)
pub trait MediaTrack: Send {
    /// Short label for logs
    fn label(&self) -> &str;

    /// Whether the track is still producing
    fn is_live(&self) -> bool;

    /// Stop the track and release its device. Must be idempotent.
    fn stop(&mut self);
}

/// Exclusive handle to an acquired camera stream
pub struct MediaStreamHandle {
    id: u64,
    device_name: String,
    tracks: Vec<Box<dyn MediaTrack>>,
    preview: Option<PreviewReceiver>,
}

impl MediaStreamHandle {
    pub fn new(
        device_name: impl Into<String>,
        tracks: Vec<Box<dyn MediaTrack>>,
        preview: Option<PreviewReceiver>,
    ) -> Self {
        Self {
            id: NEXT_STREAM_ID.fetch_add(1, Ordering::Relaxed),
            device_name: device_name.into(),
            tracks,
            preview,
        }
    }

    /// Process-unique stream id (used to key the preview subscription)
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Number of tracks still producing
    pub fn live_tracks(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_live()).count()
    }

    /// Most recent preview frame, if the stream publishes one
    pub fn latest_frame(&self) -> Option<Arc<CameraFrame>> {
        self.preview.as_ref().and_then(|rx| rx.borrow().clone())
    }

    /// A fresh receiver for the preview channel
    pub fn preview_receiver(&self) -> Option<PreviewReceiver> {
        self.preview.clone()
    }

    /// Stop every track and give up the device
    pub fn release(mut self) {
        self.stop_all();
    }

    fn stop_all(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        for track in &mut self.tracks {
            debug!(stream = self.id, track = track.label(), "Stopping media track");
            track.stop();
        }
        info!(
            stream = self.id,
            device = %self.device_name,
            tracks = self.tracks.len(),
            "Camera stream released"
        );
        self.tracks.clear();
        self.preview = None;
    }
}

impl Drop for MediaStreamHandle {
    fn drop(&mut self) {
        self.stop_all();
    }
}

impl std::fmt::Debug for MediaStreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStreamHandle")
            .field("id", &self.id)
            .field("device", &self.device_name)
            .field("live_tracks", &self.live_tracks())
            .finish()
    }
}

/// One-shot carrier for values that must pass through a `Clone` message
///
/// The receiver takes the value exactly once; if the carrier is dropped
/// without being taken, the value is dropped with it (a stream handle then
/// stops its tracks).
pub struct Handoff<T>(Arc<std::sync::Mutex<Option<T>>>);

impl<T> Handoff<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(std::sync::Mutex::new(Some(value))))
    }

    /// Take the value; later calls return None
    pub fn take(&self) -> Option<T> {
        match self.0.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl<T> Clone for Handoff<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> std::fmt::Debug for Handoff<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handoff(..)")
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Track double that records stop calls

    use super::MediaTrack;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Shared view of a [`FakeTrack`]'s lifecycle
    #[derive(Clone, Default)]
    pub struct TrackProbe {
        stopped: Arc<AtomicBool>,
        stop_calls: Arc<AtomicUsize>,
    }

    impl TrackProbe {
        pub fn is_stopped(&self) -> bool {
            self.stopped.load(Ordering::SeqCst)
        }

        pub fn stop_calls(&self) -> usize {
            self.stop_calls.load(Ordering::SeqCst)
        }
    }

    pub struct FakeTrack {
        probe: TrackProbe,
    }

    impl FakeTrack {
        pub fn new() -> (Self, TrackProbe) {
            let probe = TrackProbe::default();
            (
                Self {
                    probe: probe.clone(),
                },
                probe,
            )
        }
    }

    impl MediaTrack for FakeTrack {
        fn label(&self) -> &str {
            "fake-video"
        }

        fn is_live(&self) -> bool {
            !self.probe.is_stopped()
        }

        fn stop(&mut self) {
            self.probe.stop_calls.fetch_add(1, Ordering::SeqCst);
            self.probe.stopped.store(true, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeTrack;
    use super::*;

    #[test]
    fn test_release_stops_every_track() {
        let (a, probe_a) = FakeTrack::new();
        let (b, probe_b) = FakeTrack::new();
        let handle = MediaStreamHandle::new("test", vec![Box::new(a), Box::new(b)], None);
        assert_eq!(handle.live_tracks(), 2);

        handle.release();
        assert!(probe_a.is_stopped());
        assert!(probe_b.is_stopped());
        // Drop after release must not stop twice
        assert_eq!(probe_a.stop_calls(), 1);
    }

    #[test]
    fn test_drop_stops_tracks() {
        let (track, probe) = FakeTrack::new();
        {
            let _handle = MediaStreamHandle::new("test", vec![Box::new(track)], None);
        }
        assert!(probe.is_stopped());
    }

    #[test]
    fn test_unclaimed_handoff_releases_stream() {
        let (track, probe) = FakeTrack::new();
        let handoff = Handoff::new(MediaStreamHandle::new("test", vec![Box::new(track)], None));
        let copy = handoff.clone();
        drop(handoff);
        assert!(!probe.is_stopped());
        drop(copy);
        assert!(probe.is_stopped());
    }

    #[test]
    fn test_handoff_takes_once() {
        let handoff = Handoff::new(5u32);
        assert_eq!(handoff.clone().take(), Some(5));
        assert_eq!(handoff.take(), None);
    }

    #[test]
    fn test_latest_frame_follows_channel() {
        let (tx, rx) = watch::channel(None);
        let handle = MediaStreamHandle::new("test", Vec::new(), Some(rx));
        assert!(handle.latest_frame().is_none());

        let frame = CameraFrame::from_rgba(1, 1, vec![1, 2, 3, 4]).unwrap();
        tx.send_replace(Some(Arc::new(frame)));
        assert_eq!(handle.latest_frame().unwrap().width, 1);
    }
}
