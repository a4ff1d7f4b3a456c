// SPDX-License-Identifier: GPL-3.0-only

use crate::app::session::CapturePolicy;
use crate::backends::camera::CaptureSettings;
use crate::constants::{app_info, photo};
use crate::storage;
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::{Theme, theme};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Application theme preference
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AppTheme {
    /// Follow system theme (dark or light based on system setting)
    #[default]
    System,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl AppTheme {
    /// Dropdown order in the settings page
    pub const ALL: [AppTheme; 3] = [AppTheme::System, AppTheme::Dark, AppTheme::Light];

    /// Get the COSMIC theme for this app theme preference
    pub fn theme(&self) -> Theme {
        match self {
            Self::Dark => {
                let mut theme = theme::system_dark();
                theme.theme_type.prefer_dark(Some(true));
                theme
            }
            Self::Light => {
                let mut theme = theme::system_light();
                theme.theme_type.prefer_dark(Some(false));
                theme
            }
            Self::System => theme::system_preference(),
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Application theme preference (System, Dark, Light)
    pub app_theme: AppTheme,
    /// Mirror the front camera preview horizontally (selfie mode)
    pub mirror_preview: bool,
    /// Ignore capture requests while one is still running
    pub single_capture: bool,
    /// JPEG quality for captured photos (1-100)
    pub jpeg_quality: u8,
    /// Photo directory override
    pub photo_directory: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_theme: AppTheme::default(),
            mirror_preview: true,
            single_capture: true,
            jpeg_quality: photo::DEFAULT_JPEG_QUALITY,
            photo_directory: None,
        }
    }
}

impl Config {
    /// Load the saved settings together with their handler
    ///
    /// Falls back to defaults (and no handler) when the config store is unavailable.
    pub fn load() -> (Option<cosmic_config::Config>, Self) {
        match cosmic_config::Config::new(app_info::APP_ID, Self::VERSION) {
            Ok(handler) => {
                let config = match Self::get_entry(&handler) {
                    Ok(config) => config,
                    Err((errors, config)) => {
                        error!(?errors, "Errors loading config");
                        config
                    }
                };
                (Some(handler), config)
            }
            Err(err) => {
                error!(%err, "Failed to create config handler");
                (None, Self::default())
            }
        }
    }

    /// Capture guard derived from `single_capture`
    pub fn capture_policy(&self) -> CapturePolicy {
        if self.single_capture {
            CapturePolicy::Single
        } else {
            CapturePolicy::Overlapping
        }
    }

    /// Where and how captures are encoded
    pub fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings {
            directory: storage::photo_directory(self.photo_directory.as_deref()),
            jpeg_quality: self.jpeg_quality.clamp(1, 100),
        }
    }
}
