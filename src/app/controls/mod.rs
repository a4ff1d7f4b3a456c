// SPDX-License-Identifier: MPL-2.0

//! Camera screen controls
//!
//! - Capture button
//! - Front/back facing toggle
//! - Retake button on the photo preview

pub mod capture_button;
pub mod facing_toggle;
pub mod retake_button;
