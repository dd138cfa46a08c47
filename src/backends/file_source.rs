// SPDX-License-Identifier: GPL-3.0-only

//! Still image input
//!
//! Reads a user-chosen file, checks that it really is an image by sniffing
//! its header, and decodes it to RGBA off the async runtime.

use crate::backends::camera::types::CameraFrame;
use crate::capture::ImageAsset;
use crate::constants::file_formats::IMAGE_EXTENSIONS;
use crate::errors::FileReadError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Show the image picker; dismissing it yields [`FileReadError::Cancelled`]
pub async fn pick_image(title: String) -> Result<PathBuf, FileReadError> {
    let picked = rfd::AsyncFileDialog::new()
        .set_title(title)
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
        .await
        .map(|f| f.path().to_path_buf());
    picked.ok_or(FileReadError::Cancelled)
}

/// Read and decode an image file
pub async fn read_image(path: impl AsRef<Path>) -> Result<ImageAsset, FileReadError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    debug!(path = %path.display(), size = bytes.len(), "Read image file");

    let format = image::guess_format(&bytes)
        .map_err(|_| FileReadError::UnsupportedFormat(format!("{} is not an image", path.display())))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let encoded: Arc<[u8]> = Arc::from(bytes);

    let frame = {
        let encoded = Arc::clone(&encoded);
        tokio::task::spawn_blocking(move || decode_rgba(&encoded, format))
            .await
            .map_err(|e| FileReadError::Decode(e.to_string()))??
    };

    info!(name = %name, width = frame.width, height = frame.height, "Decoded still image");

    Ok(ImageAsset {
        name,
        mime: format.to_mime_type(),
        encoded,
        frame: Arc::new(frame),
    })
}

/// Pick a file and read it
pub async fn pick_and_read_image(title: String) -> Result<ImageAsset, FileReadError> {
    let path = pick_image(title).await?;
    read_image(path).await
}

fn decode_rgba(bytes: &[u8], format: image::ImageFormat) -> Result<CameraFrame, FileReadError> {
    let rgba = image::load_from_memory_with_format(bytes, format)?.into_rgba8();
    let (width, height) = rgba.dimensions();
    CameraFrame::from_rgba(width, height, rgba.into_raw())
        .ok_or_else(|| FileReadError::Decode("pixel buffer size mismatch".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        image::RgbaImage::from_pixel(3, 2, image::Rgba([30, 140, 60, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[tokio::test]
    async fn test_reads_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "row.png");

        let asset = read_image(&path).await.unwrap();
        assert_eq!(asset.name, "row.png");
        assert_eq!(asset.mime, "image/png");
        assert_eq!(asset.dimensions(), (3, 2));
        assert_eq!(&asset.frame.data[..4], &[30, 140, 60, 255]);
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.jpg");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"definitely not a jpeg")
            .unwrap();

        let err = read_image(&path).await.unwrap_err();
        assert!(matches!(err, FileReadError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_truncated_image_fails_decode() {
        let dir = tempfile::tempdir().unwrap();
        let full = write_png(dir.path(), "full.png");
        let bytes = std::fs::read(&full).unwrap();
        let cut = dir.path().join("cut.png");
        std::fs::write(&cut, &bytes[..bytes.len() / 2]).unwrap();

        let err = read_image(&cut).await.unwrap_err();
        assert!(!matches!(err, FileReadError::Cancelled));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = read_image("/nonexistent/agribot/field.png").await.unwrap_err();
        assert!(matches!(err, FileReadError::Io(_)));
    }
}
