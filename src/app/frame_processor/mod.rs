// SPDX-License-Identifier: MPL-2.0

//! Frame processor module for async frame analysis
//!
//! Runs detection tasks over the frame or still image held by the capture
//! flow. Currently implements (simulated) weed detection.

pub mod tasks;
pub mod types;

pub use tasks::{SimulatedWeedDetector, WeedDetector};
pub use types::{Detection, FrameRegion, format_age};
