// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │  Capture handlers   │
//! └──────────┬──────────┘
//!            │ spawn_blocking
//!            ▼
//! ┌─────────────────────┐
//! │ CameraProvider trait│  ← enumerate / acquire
//! └──────────┬──────────┘
//!            │
//!            ▼
//!       ┌────────┐
//!       │  V4L2  │  ← capture thread per stream
//!       └────────┘
//! ```

pub mod format_converters;
pub mod types;
pub mod v4l2;

pub use types::*;
pub use v4l2::V4l2Provider;

use crate::capture::MediaStreamHandle;
use crate::constants::capture::{ENVIRONMENT_HINTS, USER_HINTS};
use crate::errors::AcquisitionFailure;
use tracing::{debug, warn};

/// Source of live camera streams
pub trait CameraProvider: Send + Sync {
    /// List capture devices currently present
    fn enumerate(&self) -> Vec<CameraDevice>;

    /// Open a camera and start streaming
    ///
    /// Blocks until the first frame arrives or acquisition fails; callers on
    /// the UI runtime must run it on a blocking task.
    fn acquire(&self, request: &CameraRequest) -> Result<MediaStreamHandle, AcquisitionFailure>;
}

/// Pick the device for a request
///
/// Order: the explicit path, then devices whose name matches the facing
/// hints, then devices that do not match the opposite hints, then the first.
pub fn select_device<'a>(
    devices: &'a [CameraDevice],
    request: &CameraRequest,
) -> Option<&'a CameraDevice> {
    if let Some(path) = &request.device_path {
        if let Some(device) = devices.iter().find(|d| &d.path == path) {
            return Some(device);
        }
        warn!(path = %path, "Configured camera not present, falling back to auto selection");
    }

    let (wanted, avoided) = match request.facing {
        Facing::Environment => (ENVIRONMENT_HINTS, USER_HINTS),
        Facing::User => (USER_HINTS, ENVIRONMENT_HINTS),
    };
    let matches = |device: &CameraDevice, hints: &[&str]| {
        let name = device.name.to_lowercase();
        hints.iter().any(|hint| name.contains(hint))
    };

    let chosen = devices
        .iter()
        .find(|d| matches(d, wanted))
        .or_else(|| devices.iter().find(|d| !matches(d, avoided)))
        .or_else(|| devices.first());

    if let Some(device) = chosen {
        debug!(name = %device.name, path = %device.path, facing = %request.facing, "Selected camera");
    }
    chosen
}

/// Map an OS error from opening or starting a device to a failure reason
pub fn classify_io_error(err: &std::io::Error) -> AcquisitionFailure {
    match err.raw_os_error() {
        Some(libc::EACCES) | Some(libc::EPERM) => AcquisitionFailure::PermissionDenied,
        Some(libc::EBUSY) => AcquisitionFailure::DeviceBusy,
        Some(_) => AcquisitionFailure::NoDevice,
        None => match err.kind() {
            std::io::ErrorKind::PermissionDenied => AcquisitionFailure::PermissionDenied,
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::ResourceBusy => {
                AcquisitionFailure::DeviceBusy
            }
            _ => AcquisitionFailure::NoDevice,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn device(name: &str, path: &str) -> CameraDevice {
        CameraDevice {
            name: name.to_string(),
            path: path.to_string(),
            driver: None,
        }
    }

    #[test]
    fn test_prefers_rear_camera() {
        let devices = vec![
            device("Integrated Camera", "/dev/video0"),
            device("Rear Field Cam", "/dev/video2"),
        ];
        let chosen = select_device(&devices, &CameraRequest::default()).unwrap();
        assert_eq!(chosen.path, "/dev/video2");
    }

    #[test]
    fn test_skips_front_camera_without_hints() {
        let devices = vec![
            device("Integrated Camera", "/dev/video0"),
            device("USB 2.0 Camera", "/dev/video4"),
        ];
        let chosen = select_device(&devices, &CameraRequest::default()).unwrap();
        assert_eq!(chosen.path, "/dev/video4");
    }

    #[test]
    fn test_falls_back_to_first() {
        let devices = vec![device("Integrated Camera", "/dev/video0")];
        let chosen = select_device(&devices, &CameraRequest::default()).unwrap();
        assert_eq!(chosen.path, "/dev/video0");
        assert!(select_device(&[], &CameraRequest::default()).is_none());
    }

    #[test]
    fn test_explicit_path_wins() {
        let devices = vec![
            device("Rear Field Cam", "/dev/video2"),
            device("Integrated Camera", "/dev/video0"),
        ];
        let request = CameraRequest {
            device_path: Some("/dev/video0".into()),
            ..Default::default()
        };
        assert_eq!(select_device(&devices, &request).unwrap().path, "/dev/video0");

        let missing = CameraRequest {
            device_path: Some("/dev/video9".into()),
            ..Default::default()
        };
        assert_eq!(select_device(&devices, &missing).unwrap().path, "/dev/video2");
    }

    #[test]
    fn test_user_facing_request() {
        let devices = vec![
            device("Rear Field Cam", "/dev/video2"),
            device("Integrated Camera", "/dev/video0"),
        ];
        let request = CameraRequest {
            facing: Facing::User,
            ..Default::default()
        };
        assert_eq!(select_device(&devices, &request).unwrap().path, "/dev/video0");
    }

    #[test]
    fn test_error_classification() {
        let denied = io::Error::from_raw_os_error(libc::EACCES);
        assert_eq!(classify_io_error(&denied), AcquisitionFailure::PermissionDenied);

        let busy = io::Error::from_raw_os_error(libc::EBUSY);
        assert_eq!(classify_io_error(&busy), AcquisitionFailure::DeviceBusy);

        let missing = io::Error::from_raw_os_error(libc::ENOENT);
        assert_eq!(classify_io_error(&missing), AcquisitionFailure::NoDevice);

        let timeout = io::Error::new(io::ErrorKind::TimedOut, "no frame");
        assert_eq!(classify_io_error(&timeout), AcquisitionFailure::DeviceBusy);
    }
}
