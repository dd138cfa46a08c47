// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! - Listing available cameras
//! - Running a weed scan on an image file
//! - Printing the planting layout for an interval

use agribot::app::frame_processor::{SimulatedWeedDetector, WeedDetector};
use agribot::backends::camera::{CameraProvider, V4l2Provider};
use agribot::backends::file_source;
use agribot::capture::CaptureFlow;
use agribot::errors::CaptureError;
use agribot::planting::{self, CROP_PRESETS, SpacingCalibration};
use agribot::report::ScanReport;
use agribot::storage;
use std::path::PathBuf;

/// List all available cameras
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    let cameras = V4l2Provider::new().enumerate();

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        println!("  [{}] {}", index, camera.name);
        println!("      Path:   {}", camera.path);
        if let Some(driver) = &camera.driver {
            println!("      Driver: {}", driver);
        }
        println!();
    }

    Ok(())
}

/// Run the simulated detector over an image, optionally saving a report
pub fn scan_image(
    image: PathBuf,
    report_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async move {
        let asset = file_source::read_image(&image)
            .await
            .map_err(CaptureError::from)?;
        let (width, height) = asset.dimensions();
        println!("Loaded {} ({}x{}, {})", asset.name, width, height, asset.mime);

        let mut flow = CaptureFlow::new();
        let ticket = flow
            .begin_file_read()
            .ok_or("capture flow refused the image")?;
        flow.complete_file_read(ticket, Ok(asset));

        let request = flow.scan().ok_or("capture flow refused the scan")?;
        println!("Scanning...");
        let detections = SimulatedWeedDetector::new().detect(request.frame).await;
        flow.complete_scan(request.ticket, detections);

        let detections = flow.detections();
        if detections.is_empty() {
            println!("No weeds detected.");
        } else {
            println!("Detected {} weed(s):", detections.len());
            for detection in detections {
                let b = detection.bounds;
                println!(
                    "  #{} {:<16} at ({:.2}, {:.2}) size {:.2}x{:.2}",
                    detection.id,
                    detection.caption(),
                    b.x,
                    b.y,
                    b.width,
                    b.height
                );
            }
        }

        if let Some(dir) = report_dir {
            let report = ScanReport::from_flow(&flow);
            let path = storage::write_report(&dir, &report).await?;
            println!("Report saved: {}", path.display());
        }

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

/// Print the marker layout for a crop preset or a manual interval
pub fn print_spacing(
    crop: Option<String>,
    spacing: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut calibration = SpacingCalibration::default();

    if let Some(name) = crop {
        let preset = planting::find_preset(&name).ok_or_else(|| {
            let known: Vec<&str> = CROP_PRESETS.iter().map(|p| p.name).collect();
            format!("Unknown crop '{}' (known: {})", name, known.join(", "))
        })?;
        calibration.select_preset(preset);
    } else if let Some(cm) = spacing {
        calibration.set_spacing(cm);
    }

    let layout = calibration.layout();
    println!(
        "Crop:     {}",
        calibration.active_crop().unwrap_or("(custom)")
    );
    println!("Interval: {} cm", calibration.spacing_cm());
    println!("Plants per metre: {}", layout.plant_count);

    let row: Vec<&str> = (0..layout.positions.len())
        .map(|i| {
            if i + 1 == layout.positions.len() {
                "( )"
            } else {
                "(*)"
            }
        })
        .collect();
    println!("{}", row.join(" -- "));

    Ok(())
}
