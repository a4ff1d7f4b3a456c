// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Direction the active camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// User-facing camera (selfie)
    Front,
    /// World-facing camera
    #[default]
    Back,
}

impl Facing {
    /// Both facings, in toggle order
    pub const ALL: [Facing; 2] = [Facing::Back, Facing::Front];

    /// The other facing
    pub fn toggled(self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::Front => "front",
            Facing::Back => "back",
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Facing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" | "user" | "selfie" => Ok(Facing::Front),
            "back" | "rear" | "environment" | "world" => Ok(Facing::Back),
            other => Err(format!("unknown facing '{}', expected front or back", other)),
        }
    }
}

/// Camera permission as reported by the platform
///
/// The platform owns this value; the app only mirrors the last resolved status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// No answer from the platform yet
    #[default]
    Undetermined,
    /// Camera access allowed
    Granted,
    /// Camera access refused (or no camera to grant access to)
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

impl std::fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionStatus::Undetermined => write!(f, "undetermined"),
            PermissionStatus::Granted => write!(f, "granted"),
            PermissionStatus::Denied => write!(f, "denied"),
        }
    }
}

/// Physical mounting of a camera, as advertised by libcamera/PipeWire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraLocation {
    Front,
    Back,
    External,
}

impl CameraLocation {
    /// Parse the `api.libcamera.location` property value
    pub fn from_property(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "front" => Some(CameraLocation::Front),
            "back" => Some(CameraLocation::Back),
            "external" => Some(CameraLocation::External),
            _ => None,
        }
    }

    /// Facing this location corresponds to, if any
    pub fn facing(&self) -> Option<Facing> {
        match self {
            CameraLocation::Front => Some(Facing::Front),
            CameraLocation::Back => Some(Facing::Back),
            CameraLocation::External => None,
        }
    }
}

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraDevice {
    /// Human readable name
    pub name: String,
    /// Backend specific identifier (PipeWire serial or V4L2 path)
    pub path: String,
    /// Mounting location if the platform reports one
    pub location: Option<CameraLocation>,
}

/// Parameters for a live preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewRequest {
    pub facing: Facing,
    /// Mirror frames horizontally (only honoured for the front camera)
    pub mirror: bool,
}

impl PreviewRequest {
    pub fn new(facing: Facing, mirror: bool) -> Self {
        Self { facing, mirror }
    }

    /// Whether frames delivered for this request should be flipped
    pub fn should_mirror(&self) -> bool {
        self.mirror && self.facing == Facing::Front
    }
}

/// A single RGBA preview frame with tightly packed rows
#[derive(Debug, Clone)]
pub struct PreviewFrame {
    pub width: u32,
    pub height: u32,
    /// RGBA pixels, `width * height * 4` bytes
    pub data: Arc<[u8]>,
}

impl PreviewFrame {
    /// Build a frame from a possibly padded RGBA buffer
    ///
    /// Returns `None` for an empty geometry or a buffer too short for it.
    pub fn from_strided(width: u32, height: u32, stride: usize, data: &[u8]) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let row_len = width as usize * 4;
        if stride < row_len || data.len() < stride * (height as usize).saturating_sub(1) + row_len
        {
            return None;
        }

        let pixels: Vec<u8> = if stride == row_len {
            data[..row_len * height as usize].to_vec()
        } else {
            data.chunks(stride)
                .take(height as usize)
                .flat_map(|row| &row[..row_len])
                .copied()
                .collect()
        };

        Some(Self {
            width,
            height,
            data: Arc::from(pixels),
        })
    }

    /// Horizontally mirrored copy of this frame
    pub fn mirrored(&self) -> Self {
        let row_len = self.width as usize * 4;
        let mut pixels = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(row_len) {
            for px in row.chunks_exact(4).rev() {
                pixels.extend_from_slice(px);
            }
        }

        Self {
            width: self.width,
            height: self.height,
            data: Arc::from(pixels),
        }
    }
}

/// Reference to a photo produced by a capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPhoto {
    /// Location of the encoded image
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Camera the photo was taken with
    pub facing: Facing,
}

impl CapturedPhoto {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` URI for the photo
    pub fn uri(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Sending half handed to a backend when a preview starts
pub type FrameSender = futures::channel::mpsc::Sender<PreviewFrame>;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Backend is not available on this system
    NotAvailable(String),
    /// Camera access was refused
    PermissionDenied,
    /// No camera matches the request
    DeviceNotFound(String),
    /// Failed to build or start the pipeline
    InitializationFailed(String),
    /// Capture requested before any frame arrived
    NoFrameAvailable,
    /// Image encoding failed
    EncodingFailed(String),
    /// General I/O error
    IoError(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NotAvailable(msg) => write!(f, "Backend not available: {}", msg),
            BackendError::PermissionDenied => write!(f, "Camera permission denied"),
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            BackendError::NoFrameAvailable => write!(f, "No frame available for capture"),
            BackendError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_toggle_is_involution() {
        for facing in Facing::ALL {
            assert_ne!(facing.toggled(), facing);
            assert_eq!(facing.toggled().toggled(), facing);
        }
    }

    #[test]
    fn test_facing_from_str() {
        assert_eq!("Front".parse::<Facing>(), Ok(Facing::Front));
        assert_eq!("rear".parse::<Facing>(), Ok(Facing::Back));
        assert!("sideways".parse::<Facing>().is_err());
    }

    #[test]
    fn test_location_property() {
        assert_eq!(
            CameraLocation::from_property("front"),
            Some(CameraLocation::Front)
        );
        assert_eq!(CameraLocation::from_property(" Back "), Some(CameraLocation::Back));
        assert_eq!(CameraLocation::from_property("unknown"), None);
        assert_eq!(CameraLocation::External.facing(), None);
    }

    #[test]
    fn test_from_strided_drops_padding() {
        // 2x2 frame, rows padded to 12 bytes
        let mut data = Vec::new();
        data.extend_from_slice(&[1, 1, 1, 1, 2, 2, 2, 2, 0, 0, 0, 0]);
        data.extend_from_slice(&[3, 3, 3, 3, 4, 4, 4, 4, 0, 0, 0, 0]);

        let frame = PreviewFrame::from_strided(2, 2, 12, &data).unwrap();
        assert_eq!(frame.data.len(), 16);
        assert_eq!(&frame.data[..8], &[1, 1, 1, 1, 2, 2, 2, 2]);
        assert_eq!(&frame.data[8..], &[3, 3, 3, 3, 4, 4, 4, 4]);
    }

    #[test]
    fn test_from_strided_rejects_short_buffer() {
        assert!(PreviewFrame::from_strided(4, 4, 16, &[0u8; 20]).is_none());
        assert!(PreviewFrame::from_strided(4, 1, 8, &[0u8; 16]).is_none());
    }

    #[test]
    fn test_from_strided_rejects_empty_geometry() {
        assert!(PreviewFrame::from_strided(0, 2, 0, &[]).is_none());
        assert!(PreviewFrame::from_strided(0, 2, 16, &[0u8; 32]).is_none());
        assert!(PreviewFrame::from_strided(2, 0, 8, &[0u8; 8]).is_none());
    }

    #[test]
    fn test_mirrored_reverses_pixels_per_row() {
        let data = [1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4];
        let frame = PreviewFrame::from_strided(2, 2, 8, &data).unwrap();
        let mirrored = frame.mirrored();
        assert_eq!(
            &mirrored.data[..],
            &[2, 2, 2, 2, 1, 1, 1, 1, 4, 4, 4, 4, 3, 3, 3, 3]
        );
    }

    #[test]
    fn test_preview_request_mirrors_front_only() {
        assert!(PreviewRequest::new(Facing::Front, true).should_mirror());
        assert!(!PreviewRequest::new(Facing::Back, true).should_mirror());
        assert!(!PreviewRequest::new(Facing::Front, false).should_mirror());
    }

    #[test]
    fn test_captured_photo_uri() {
        let photo = CapturedPhoto {
            path: PathBuf::from("/tmp/IMG_1.jpg"),
            width: 640,
            height: 480,
            facing: Facing::Back,
        };
        assert_eq!(photo.uri(), "file:///tmp/IMG_1.jpg");
    }
}
