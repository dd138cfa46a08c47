// SPDX-License-Identifier: GPL-3.0-only
//! Pixel format conversion for V4L2 capture buffers
//!
//! Webcams deliver either MJPEG or packed YUV 4:2:2. Both are turned into
//! tightly packed RGBA so the preview and the detector see one layout.

use crate::backends::camera::types::{BackendError, BackendResult, CameraFrame};

/// FourCC codes the capture thread knows how to convert
pub const FOURCC_MJPG: [u8; 4] = *b"MJPG";
pub const FOURCC_YUYV: [u8; 4] = *b"YUYV";

/// Convert YUYV (YUV 4:2:2) to RGBA
///
/// YUYV format: Y0 U0 Y1 V0 - each 4-byte group encodes 2 pixels.
/// Uses BT.601 coefficients for YUV to RGB conversion.
pub fn yuyv_to_rgba(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let pixel_count = (width * height) as usize;
    let mut rgba = Vec::with_capacity(pixel_count * 4);

    for chunk in data.chunks_exact(4) {
        let y0 = chunk[0] as f32;
        let u = chunk[1] as f32 - 128.0;
        let y1 = chunk[2] as f32;
        let v = chunk[3] as f32 - 128.0;

        for y in [y0, y1] {
            if rgba.len() >= pixel_count * 4 {
                break;
            }
            rgba.push((y + 1.402 * v).clamp(0.0, 255.0) as u8);
            rgba.push((y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8);
            rgba.push((y + 1.772 * u).clamp(0.0, 255.0) as u8);
            rgba.push(255);
        }
    }

    // Short buffers (truncated USB transfers) are padded black
    rgba.resize(pixel_count * 4, 0);
    rgba
}

/// Decode one MJPEG buffer into an RGBA frame
pub fn mjpeg_to_frame(data: &[u8]) -> BackendResult<CameraFrame> {
    let decoded = image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
        .map_err(|e| BackendError::FormatNotSupported(format!("MJPEG decode failed: {}", e)))?
        .into_rgba8();
    let (width, height) = decoded.dimensions();
    CameraFrame::from_rgba(width, height, decoded.into_raw())
        .ok_or_else(|| BackendError::Other("decoded frame size mismatch".to_string()))
}

/// Convert a raw capture buffer according to its FourCC
pub fn buffer_to_frame(
    fourcc: [u8; 4],
    data: &[u8],
    width: u32,
    height: u32,
) -> BackendResult<CameraFrame> {
    match fourcc {
        FOURCC_MJPG => mjpeg_to_frame(data),
        FOURCC_YUYV => CameraFrame::from_rgba(width, height, yuyv_to_rgba(data, width, height))
            .ok_or_else(|| BackendError::Other("YUYV frame size mismatch".to_string())),
        other => Err(BackendError::FormatNotSupported(
            String::from_utf8_lossy(&other).into_owned(),
        )),
    }
}
