// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// UI Constants
pub mod ui {
    /// Capture button size (outer)
    pub const CAPTURE_BUTTON_OUTER: f32 = 60.0;

    /// Capture button size (inner)
    pub const CAPTURE_BUTTON_INNER: f32 = 50.0;

    /// Capture button border radius
    pub const CAPTURE_BUTTON_RADIUS: f32 = 25.0;

    /// Scale applied to the capture button while a capture is pending
    pub const CAPTURE_BUTTON_PRESSED_SCALE: f32 = 0.85;

    /// Overlay button/container background transparency (0.0 = transparent, 1.0 = opaque)
    pub const OVERLAY_BACKGROUND_ALPHA: f32 = 0.6;

    /// Overlay container border radius
    pub const OVERLAY_BORDER_RADIUS: f32 = 8.0;

    /// Facing toggle button edge length
    pub const TOGGLE_BUTTON_SIZE: f32 = 52.0;

    /// Facing toggle icon size
    pub const TOGGLE_ICON_SIZE: u16 = 32;

    /// Width of the permission message column
    pub const PERMISSION_TEXT_WIDTH: f32 = 360.0;
}

/// GStreamer pipeline constants
pub mod pipeline {
    /// Maximum buffer queue size (keep small for low latency)
    pub const MAX_BUFFERS: u32 = 2;

    /// Output pixel format for appsink
    pub const OUTPUT_FORMAT: &str = "RGBA";

    /// Device monitor class filter for cameras
    pub const VIDEO_SOURCE_CLASS: &str = "Video/Source";
}

/// Photo constants
pub mod photo {
    /// Default JPEG quality (0-100)
    pub const DEFAULT_JPEG_QUALITY: u8 = 92;

    /// Directory name under the user's pictures directory
    pub const DIRECTORY_NAME: &str = "snapcam";

    /// File name prefix for captured photos
    pub const FILE_PREFIX: &str = "IMG_";
}

/// Timing constants
pub mod timing {
    use std::time::Duration;

    /// Frame counter modulo for periodic logging
    pub const FRAME_LOG_INTERVAL: u64 = 30;

    /// Wait before restarting a preview that failed or ended
    pub const PREVIEW_RETRY_DELAY: Duration = Duration::from_secs(2);

    /// Warm-up time before a headless capture
    pub const CLI_WARMUP: Duration = Duration::from_millis(700);

    /// Give up on a headless capture after this long
    pub const CLI_CAPTURE_TIMEOUT: Duration = Duration::from_secs(5);
}

/// Channel sizes
pub mod channels {
    /// Frames buffered between the pipeline and the preview subscription
    pub const FRAME_CHANNEL_CAPACITY: usize = 4;

    /// Messages buffered between the preview subscription and the UI
    pub const PREVIEW_SUBSCRIPTION_CAPACITY: usize = 8;
}

/// Application information
pub mod app_info {
    use std::path::Path;

    /// Application id in RDNN format, also the cosmic-config namespace
    pub const APP_ID: &str = "dev.snapcam.Snapcam";

    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Check if the application is running inside a Flatpak sandbox
    pub fn is_flatpak() -> bool {
        Path::new("/.flatpak-info").exists()
    }

    /// Get the runtime environment string (e.g., "Flatpak" or "Native")
    pub fn runtime_environment() -> &'static str {
        if is_flatpak() { "Flatpak" } else { "Native" }
    }
}
