// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use std::sync::Arc;
use std::time::Instant;

/// A decoded RGBA frame, either from a live camera or a still image
#[derive(Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA pixels (`width * height * 4` bytes)
    pub data: Arc<[u8]>,
    /// When the frame was captured or decoded
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Wrap RGBA pixels; returns None when the buffer does not match the size
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            data: Arc::from(data),
            captured_at: Instant::now(),
        })
    }
}

impl std::fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CameraFrame {{ {}x{}, {} bytes }}",
            self.width,
            self.height,
            self.data.len()
        )
    }
}

/// Which way the requested camera should point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Towards the field (rear camera)
    #[default]
    Environment,
    /// Towards the operator
    User,
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facing::Environment => write!(f, "environment"),
            Facing::User => write!(f, "user"),
        }
    }
}

/// Parameters for a camera acquisition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraRequest {
    pub facing: Facing,
    /// Explicit device path; overrides facing-based selection
    pub device_path: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraRequest {
    fn default() -> Self {
        Self {
            facing: Facing::Environment,
            device_path: None,
            width: crate::constants::capture::PREFERRED_WIDTH,
            height: crate::constants::capture::PREFERRED_HEIGHT,
        }
    }
}

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    /// Human readable name (V4L2 card / sysfs name)
    pub name: String,
    /// Device node, e.g. /dev/video0
    pub path: String,
    /// Driver name, if the device could be queried
    pub driver: Option<String>,
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Camera device not found
    DeviceNotFound(String),
    /// Format not supported
    FormatNotSupported(String),
    /// General I/O error
    IoError(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::FormatNotSupported(msg) => write!(f, "Format not supported: {}", msg),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_size_checked() {
        assert!(CameraFrame::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(CameraFrame::from_rgba(2, 2, vec![0; 15]).is_none());
    }
}
