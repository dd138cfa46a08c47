// SPDX-License-Identifier: GPL-3.0-only

//! Frame processing tasks
//!
//! This module contains the detector abstraction and its implementations.

pub mod weed_detector;

pub use weed_detector::{SimulatedWeedDetector, WeedDetector};
