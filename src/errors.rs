// SPDX-License-Identifier: MPL-2.0

//! Error types for the camera application

use crate::backends::camera::BackendError;
use std::fmt;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Permission-related errors
    Permission(PermissionError),
    /// Photo capture errors
    Photo(PhotoError),
    /// Storage/filesystem errors
    Storage(String),
}

/// Camera-specific errors
#[derive(Debug, Clone)]
pub enum CameraError {
    /// No camera devices found
    NoCameraFound,
    /// Preview pipeline could not be started
    PreviewFailed(String),
    /// Backend error (e.g., GStreamer)
    BackendError(String),
}

/// Permission errors
#[derive(Debug, Clone)]
pub enum PermissionError {
    /// The user or the sandbox refused camera access
    Denied,
    /// The permission portal could not be reached
    PortalUnavailable(String),
}

/// Photo capture errors
#[derive(Debug, Clone)]
pub enum PhotoError {
    /// No frame available for capture
    NoFrameAvailable,
    /// Encoding failed
    EncodingFailed(String),
    /// Save failed
    SaveFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Permission(e) => write!(f, "Permission error: {}", e),
            AppError::Photo(e) => write!(f, "Photo error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::PreviewFailed(msg) => write!(f, "Preview failed: {}", msg),
            CameraError::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::Denied => write!(f, "Camera access denied"),
            PermissionError::PortalUnavailable(msg) => {
                write!(f, "Camera portal unavailable: {}", msg)
            }
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::NoFrameAvailable => write!(f, "No frame available for capture"),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            PhotoError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for PermissionError {}
impl std::error::Error for PhotoError {}

// Conversions from sub-errors to AppError
impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<PermissionError> for AppError {
    fn from(err: PermissionError) -> Self {
        AppError::Permission(err)
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Photo(err)
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::PermissionDenied => AppError::Permission(PermissionError::Denied),
            BackendError::DeviceNotFound(_) => AppError::Camera(CameraError::NoCameraFound),
            BackendError::InitializationFailed(msg) => {
                AppError::Camera(CameraError::PreviewFailed(msg))
            }
            BackendError::NoFrameAvailable => AppError::Photo(PhotoError::NoFrameAvailable),
            BackendError::EncodingFailed(msg) => AppError::Photo(PhotoError::EncodingFailed(msg)),
            BackendError::IoError(msg) => AppError::Storage(msg),
            BackendError::NotAvailable(msg) | BackendError::Other(msg) => {
                AppError::Camera(CameraError::BackendError(msg))
            }
        }
    }
}
