// SPDX-License-Identifier: MPL-2.0

//! Input backends for the capture flow
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                Capture flow                  │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │               Backend Layer                  │
//! │  ┌─────────────┐    ┌──────────────────┐    │
//! │  │   Camera    │    │   File source    │    │
//! │  │   (V4L2)    │    │ (rfd + image)    │    │
//! │  └─────────────┘    └──────────────────┘    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! - [`camera`]: device enumeration and live streams
//! - [`file_source`]: still image picking and decoding

pub mod camera;
pub mod file_source;
