// SPDX-License-Identifier: GPL-3.0-only

//! System handlers
//!
//! Handles URLs, the context drawer and settings.

use crate::app::state::{AppModel, ContextPage, JPEG_QUALITY_PRESETS, Message};
use crate::config::{AppTheme, Config};
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use tracing::{error, info};

impl AppModel {
    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(url = %url, error = %err, "Failed to open URL");
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    /// Push config values that live outside the model into the session and platform
    pub(crate) fn apply_config(&mut self) {
        self.session.set_policy(self.config.capture_policy());
        self.platform
            .apply_capture_settings(self.config.capture_settings());
    }

    fn save_config(&self, what: &str) {
        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, setting = what, "Failed to save setting");
        }
    }

    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        let theme_changed = self.config.app_theme != config.app_theme;
        self.config = config;
        self.apply_config();

        if theme_changed {
            cosmic::command::set_theme(self.config.app_theme.theme())
        } else {
            Task::none()
        }
    }

    pub(crate) fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        if index >= AppTheme::ALL.len() {
            return Task::none();
        }
        let app_theme = AppTheme::from_index(index);

        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;
        self.save_config("app_theme");

        cosmic::command::set_theme(app_theme.theme())
    }

    pub(crate) fn handle_toggle_mirror_preview(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.mirror_preview = !self.config.mirror_preview;
        info!(
            mirror_preview = self.config.mirror_preview,
            "Mirror preview toggled"
        );
        self.save_config("mirror_preview");
        Task::none()
    }

    pub(crate) fn handle_toggle_single_capture(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.single_capture = !self.config.single_capture;
        info!(
            single_capture = self.config.single_capture,
            "Capture guard toggled"
        );
        self.apply_config();
        self.save_config("single_capture");
        Task::none()
    }

    pub(crate) fn handle_set_jpeg_quality(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(quality) = JPEG_QUALITY_PRESETS.get(index).copied() else {
            return Task::none();
        };

        info!(quality, "Setting JPEG quality");
        self.config.jpeg_quality = quality;
        self.apply_config();
        self.save_config("jpeg_quality");
        Task::none()
    }
}
