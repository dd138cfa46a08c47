// SPDX-License-Identifier: MPL-2.0

//! Detection overlay
//!
//! Boxes are drawn straight into a copy of the frame's RGBA pixels, so the
//! overlay always lines up with the image however the view scales it.
//! Detection regions use normalized coordinates (0.0 to 1.0).

use crate::app::frame_processor::Detection;
use crate::backends::camera::types::CameraFrame;
use crate::constants::ui::{DETECTION_BORDER_WIDTH, MIN_DETECTION_BOX};
use cosmic::widget::image::Handle;

/// Box color for a confidence score
pub fn confidence_color(confidence: u8) -> [u8; 4] {
    match confidence {
        90..=u8::MAX => [220, 53, 69, 255],
        75..=89 => [253, 126, 20, 255],
        _ => [255, 193, 7, 255],
    }
}

/// Border thickness for a frame, growing with resolution
fn border_width(frame_width: u32, frame_height: u32) -> u32 {
    DETECTION_BORDER_WIDTH.max(frame_width.min(frame_height) / 200)
}

/// Copy of the frame's pixels with a rectangle outlined per detection
pub fn draw_detection_boxes(frame: &CameraFrame, detections: &[Detection]) -> Vec<u8> {
    let mut pixels = frame.data.to_vec();
    let (fw, fh) = (frame.width, frame.height);
    if fw == 0 || fh == 0 {
        return pixels;
    }
    let border = border_width(fw, fh);

    for detection in detections {
        let (mut x, mut y, mut w, mut h) = detection.bounds.to_pixels(fw, fh);

        // Keep tiny regions visible
        if w < MIN_DETECTION_BOX {
            x = x.saturating_sub((MIN_DETECTION_BOX - w) / 2);
            w = MIN_DETECTION_BOX.min(fw - x);
        }
        if h < MIN_DETECTION_BOX {
            y = y.saturating_sub((MIN_DETECTION_BOX - h) / 2);
            h = MIN_DETECTION_BOX.min(fh - y);
        }
        if w == 0 || h == 0 {
            continue;
        }

        let color = confidence_color(detection.confidence);
        let bx = border.min(w);
        let by = border.min(h);
        fill_rect(&mut pixels, fw, x, y, w, by, color);
        fill_rect(&mut pixels, fw, x, y + h - by, w, by, color);
        fill_rect(&mut pixels, fw, x, y, bx, h, color);
        fill_rect(&mut pixels, fw, x + w - bx, y, bx, h, color);
    }

    pixels
}

/// Image handle of the frame with detections drawn on it
pub fn overlay_handle(frame: &CameraFrame, detections: &[Detection]) -> Handle {
    let pixels = if detections.is_empty() {
        frame.data.to_vec()
    } else {
        draw_detection_boxes(frame, detections)
    };
    Handle::from_rgba(frame.width, frame.height, pixels)
}

fn fill_rect(pixels: &mut [u8], stride: u32, x: u32, y: u32, w: u32, h: u32, color: [u8; 4]) {
    for row in y..y + h {
        let start = ((row * stride + x) * 4) as usize;
        let end = start + (w * 4) as usize;
        if end > pixels.len() {
            return;
        }
        for px in pixels[start..end].chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::frame_processor::FrameRegion;
    use chrono::Local;

    fn blank(width: u32, height: u32) -> CameraFrame {
        CameraFrame::from_rgba(width, height, vec![0; (width * height * 4) as usize]).unwrap()
    }

    fn pixel(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }

    #[test]
    fn test_colors_by_confidence() {
        assert_eq!(confidence_color(94), [220, 53, 69, 255]);
        assert_eq!(confidence_color(87), [253, 126, 20, 255]);
        assert_eq!(confidence_color(40), [255, 193, 7, 255]);
    }

    #[test]
    fn test_box_outline_drawn() {
        let frame = blank(100, 100);
        let detection = Detection::new(1, "Dandelion", 94, Local::now(), FrameRegion::new(0.2, 0.2, 0.5, 0.5));
        let pixels = draw_detection_boxes(&frame, &[detection]);

        let red = confidence_color(94);
        // Corners and edges
        assert_eq!(pixel(&pixels, 100, 20, 20), red);
        assert_eq!(pixel(&pixels, 100, 69, 69), red);
        assert_eq!(pixel(&pixels, 100, 45, 20), red);
        // Interior and outside untouched
        assert_eq!(pixel(&pixels, 100, 45, 45), [0, 0, 0, 0]);
        assert_eq!(pixel(&pixels, 100, 5, 5), [0, 0, 0, 0]);
        // Source frame untouched
        assert!(frame.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_region_outside_frame_is_clipped() {
        let frame = blank(40, 40);
        let detection = Detection::new(1, "Thistle", 87, Local::now(), FrameRegion::new(0.9, 0.9, 0.5, 0.5));
        let pixels = draw_detection_boxes(&frame, &[detection]);
        assert_eq!(pixels.len(), frame.data.len());
        assert_eq!(pixel(&pixels, 40, 39, 39), confidence_color(87));
    }

    #[test]
    fn test_tiny_region_grows() {
        let frame = blank(200, 200);
        let detection = Detection::new(1, "Thistle", 50, Local::now(), FrameRegion::new(0.5, 0.5, 0.0, 0.0));
        let pixels = draw_detection_boxes(&frame, &[detection]);
        let painted = pixels.chunks_exact(4).filter(|p| p[3] == 255).count();
        assert!(painted > 0);
    }
}
