// SPDX-License-Identifier: MPL-2.0

//! Error types for the field console

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Report storage error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Filesystem errors (report directory, report file)
    Storage(String),
    /// A report could not be serialized
    Serialize(String),
}

/// Recoverable errors surfaced by the capture flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The camera could not be acquired. Shown to the user as a notice.
    CameraUnavailable(AcquisitionFailure),
    /// A still image could not be read. Logged only.
    FileReadFailed(FileReadError),
}

/// Reasons a camera acquisition request can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionFailure {
    /// The user or the system refused access to the device
    PermissionDenied,
    /// No usable capture device exists
    NoDevice,
    /// The device exists but another process holds it
    DeviceBusy,
}

/// Still image read errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReadError {
    /// The picker was dismissed without a selection
    Cancelled,
    /// The file could not be read from disk
    Io(String),
    /// The file is not an image type we can decode
    UnsupportedFormat(String),
    /// The file claimed to be an image but failed to decode
    Decode(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::CameraUnavailable(reason) => write!(f, "Camera unavailable: {}", reason),
            CaptureError::FileReadFailed(e) => write!(f, "Image read failed: {}", e),
        }
    }
}

impl fmt::Display for AcquisitionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionFailure::PermissionDenied => write!(f, "permission denied"),
            AcquisitionFailure::NoDevice => write!(f, "no camera device found"),
            AcquisitionFailure::DeviceBusy => write!(f, "camera is in use by another application"),
        }
    }
}

impl fmt::Display for FileReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileReadError::Cancelled => write!(f, "selection cancelled"),
            FileReadError::Io(msg) => write!(f, "I/O error: {}", msg),
            FileReadError::UnsupportedFormat(msg) => write!(f, "unsupported format: {}", msg),
            FileReadError::Decode(msg) => write!(f, "decode failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for AcquisitionFailure {}
impl std::error::Error for FileReadError {}

impl From<AcquisitionFailure> for CaptureError {
    fn from(reason: AcquisitionFailure) -> Self {
        CaptureError::CameraUnavailable(reason)
    }
}

impl From<FileReadError> for CaptureError {
    fn from(err: FileReadError) -> Self {
        CaptureError::FileReadFailed(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialize(err.to_string())
    }
}

impl From<std::io::Error> for FileReadError {
    fn from(err: std::io::Error) -> Self {
        FileReadError::Io(err.to_string())
    }
}

impl From<image::ImageError> for FileReadError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => FileReadError::UnsupportedFormat(e.to_string()),
            image::ImageError::IoError(e) => FileReadError::Io(e.to_string()),
            other => FileReadError::Decode(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_error_classification() {
        let err = image::load_from_memory(b"definitely not an image").unwrap_err();
        assert!(matches!(
            FileReadError::from(err),
            FileReadError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn test_read_failure_wraps_into_capture_error() {
        let err = CaptureError::from(FileReadError::Decode("truncated".into()));
        assert_eq!(err.to_string(), "Image read failed: decode failed: truncated");
    }

    #[test]
    fn test_serialize_error_converts() {
        let err = serde_json::from_str::<u32>("{").unwrap_err();
        assert!(matches!(AppError::from(err), AppError::Serialize(_)));
    }
}
