// SPDX-License-Identifier: GPL-3.0-only

//! Settings drawer
//!
//! Theme, camera device and report location.

pub mod view;
