// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::app::session::{CaptureTicket, PhotoSession};
use crate::backends::camera::{
    BackendResult, CameraPlatform, CapturedPhoto, PermissionStatus, PreviewFrame,
};
use crate::config::Config;
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use cosmic::widget::image;
use std::sync::Arc;

/// The context page to display in the context drawer
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// JPEG quality presets offered in the settings page
pub const JPEG_QUALITY_PRESETS: [u8; 4] = [75, 85, 92, 100];

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Config handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,

    /// Permission, facing and captured photo
    pub session: PhotoSession,
    /// Camera capability shared with background tasks
    pub platform: Arc<dyn CameraPlatform>,

    /// Latest preview frame as an image handle
    pub preview_handle: Option<image::Handle>,
    /// Image handle of the captured photo shown in the preview screen
    pub photo_handle: Option<image::Handle>,

    /// Theme dropdown labels
    pub theme_dropdown_options: Vec<String>,
    /// JPEG quality dropdown labels
    pub quality_dropdown_options: Vec<String>,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL
    LaunchUrl(String),
    /// Toggle context drawer page
    ToggleContextPage(ContextPage),

    // ===== Permission =====
    /// Ask the platform for camera access
    RequestPermission,
    /// Platform answered a permission request
    PermissionResolved(PermissionStatus),

    // ===== Camera =====
    /// Flip between front and back camera
    ToggleFacing,
    /// New preview frame from the live camera
    PreviewFrame(Arc<PreviewFrame>),

    // ===== Capture =====
    /// Capture button pressed
    Capture,
    /// A capture resolved
    CaptureFinished(CaptureTicket, BackendResult<CapturedPhoto>),
    /// Discard the captured photo
    Retake,
    /// Open the folder photos are saved to
    OpenPhotoDirectory,

    // ===== Settings =====
    /// Configuration changed on disk
    UpdateConfig(Config),
    /// Set application theme (index into `AppTheme::ALL`)
    SetAppTheme(usize),
    /// Toggle mirroring of the front camera preview
    ToggleMirrorPreview,
    /// Toggle the single capture guard
    ToggleSingleCapture,
    /// Set JPEG quality (index into `JPEG_QUALITY_PRESETS`)
    SetJpegQuality(usize),
}
