// SPDX-License-Identifier: MPL-2.0

//! Snapcam - a single-screen camera for the COSMIC desktop
//!
//! Asks for camera permission, shows a live preview from the front or back
//! camera, captures a still photo and shows it with a retake button.
//!
//! # Architecture
//!
//! - [`app`]: application model, session state machine and UI
//! - [`backends`]: camera platform trait and the portal/GStreamer implementation
//! - [`config`]: user configuration handling
//! - [`storage`]: photo naming and JPEG encoding

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod storage;

// Re-export commonly used types
pub use app::session::{CapturePolicy, Control, Effect, PhotoSession, ViewState};
pub use app::{AppModel, Message};
pub use backends::camera::{CameraPlatform, CapturedPhoto, Facing, PermissionStatus};
pub use config::Config;
