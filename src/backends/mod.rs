// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for camera access
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App Layer                   │
//! └────────────────────┬────────────────────────┘
//!                      │  CameraPlatform
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌─────────────┐    ┌──────────────────┐   │
//! │  │ Permission  │    │ Preview/Capture  │   │
//! │  │ (XDG portal)│    │   (GStreamer)    │   │
//! │  └─────────────┘    └──────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! - [`camera`]: platform trait, device selection and the system implementation

pub mod camera;
