// SPDX-License-Identifier: MPL-2.0

//! Camera backend abstraction
//!
//! The app talks to the camera only through [`CameraPlatform`]. The production
//! implementation is [`SystemPlatform`], which asks the XDG camera portal for
//! access and drives GStreamer for preview and capture. Tests substitute their
//! own implementation.
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraPlatform trait│  ← permission, preview, capture
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │   SystemPlatform    │
//! └───┬─────────────┬───┘
//!     ▼             ▼
//!  portal       pipeline
//! ```

pub mod pipeline;
pub mod portal;
pub mod system;
pub mod types;

pub use system::SystemPlatform;
pub use types::*;

use futures::future::BoxFuture;
use std::path::PathBuf;

/// Settings the platform needs when encoding a capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    /// Directory photos are written to
    pub directory: PathBuf,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

/// A running live preview
///
/// Dropping the session must release the camera as well.
pub trait PreviewSession: Send {
    /// Stop delivering frames and release the device
    fn stop(&mut self);
}

/// Platform camera capability
///
/// Covers the permission query/request pair, the live preview primitive and the
/// still capture operation. Async operations return `'static` futures so they
/// can be handed straight to the UI runtime.
pub trait CameraPlatform: Send + Sync {
    /// Last permission status known to the platform
    fn permission_status(&self) -> PermissionStatus;

    /// Ask the platform for camera access
    ///
    /// Idempotent when access was already granted. Resolves to `Granted` or `Denied`.
    fn request_permission(&self) -> BoxFuture<'static, PermissionStatus>;

    /// Cameras currently known to the platform
    fn enumerate_cameras(&self) -> Vec<CameraDevice>;

    /// Start a live preview for the requested facing
    ///
    /// Frames are pushed into `frames` until the returned session is stopped or dropped.
    fn start_preview(
        &self,
        request: PreviewRequest,
        frames: FrameSender,
    ) -> BackendResult<Box<dyn PreviewSession>>;

    /// Capture a still photo from the camera facing `facing`
    fn capture(&self, facing: Facing) -> BoxFuture<'static, BackendResult<CapturedPhoto>>;

    /// Update where and how captures are encoded
    fn apply_capture_settings(&self, _settings: CaptureSettings) {}
}

/// Pick the device that best matches `facing`
///
/// Devices reporting a matching location win. Otherwise, among devices without a
/// front/back location, the first is treated as front and the second as back
/// (a single unlabelled camera serves both). Any device is better than none.
pub fn select_device(devices: &[CameraDevice], facing: Facing) -> Option<usize> {
    let device_facing = |device: &CameraDevice| device.location.and_then(|loc| loc.facing());

    if let Some(index) = devices
        .iter()
        .position(|device| device_facing(device) == Some(facing))
    {
        return Some(index);
    }

    let unlabelled: Vec<usize> = devices
        .iter()
        .enumerate()
        .filter(|(_, device)| device_facing(device).is_none())
        .map(|(index, _)| index)
        .collect();

    let pick = match facing {
        Facing::Front => unlabelled.first(),
        Facing::Back => unlabelled.get(1).or(unlabelled.first()),
    };

    pick.copied()
        .or_else(|| if devices.is_empty() { None } else { Some(0) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, location: Option<CameraLocation>) -> CameraDevice {
        CameraDevice {
            name: name.to_string(),
            path: format!("pipewire-serial-{}", name),
            location,
        }
    }

    #[test]
    fn test_select_device_by_location() {
        let devices = vec![
            device("rear", Some(CameraLocation::Back)),
            device("selfie", Some(CameraLocation::Front)),
        ];
        assert_eq!(select_device(&devices, Facing::Front), Some(1));
        assert_eq!(select_device(&devices, Facing::Back), Some(0));
    }

    #[test]
    fn test_select_device_unlabelled_order() {
        let devices = vec![device("a", None), device("b", None)];
        assert_eq!(select_device(&devices, Facing::Front), Some(0));
        assert_eq!(select_device(&devices, Facing::Back), Some(1));
    }

    #[test]
    fn test_single_camera_serves_both_facings() {
        let devices = vec![device("webcam", None)];
        assert_eq!(select_device(&devices, Facing::Front), Some(0));
        assert_eq!(select_device(&devices, Facing::Back), Some(0));

        let labelled = vec![device("laptop", Some(CameraLocation::Front))];
        assert_eq!(select_device(&labelled, Facing::Back), Some(0));
    }

    #[test]
    fn test_external_counts_as_unlabelled() {
        let devices = vec![
            device("selfie", Some(CameraLocation::Front)),
            device("usb", Some(CameraLocation::External)),
        ];
        assert_eq!(select_device(&devices, Facing::Back), Some(1));
    }

    #[test]
    fn test_select_device_empty() {
        assert_eq!(select_device(&[], Facing::Back), None);
    }
}
