// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function is a dispatcher; the handlers live in the
//! `handlers` submodules grouped by concern.
//!
//! # Handler Modules
//!
//! - `handlers::permission`: permission requests and their results
//! - `handlers::camera`: facing toggle and preview frames
//! - `handlers::capture`: capture, capture results, retake
//! - `handlers::system`: URLs, context pages, settings

use crate::app::session::Effect;
use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),

            // ===== Permission =====
            Message::RequestPermission => self.handle_request_permission(),
            Message::PermissionResolved(status) => self.handle_permission_resolved(status),

            // ===== Camera =====
            Message::ToggleFacing => self.handle_toggle_facing(),
            Message::PreviewFrame(frame) => self.handle_preview_frame(frame),

            // ===== Capture =====
            Message::Capture => self.handle_capture(),
            Message::CaptureFinished(ticket, result) => {
                self.handle_capture_finished(ticket, result)
            }
            Message::Retake => self.handle_retake(),
            Message::OpenPhotoDirectory => self.handle_open_photo_directory(),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
            Message::ToggleMirrorPreview => self.handle_toggle_mirror_preview(),
            Message::ToggleSingleCapture => self.handle_toggle_single_capture(),
            Message::SetJpegQuality(index) => self.handle_set_jpeg_quality(index),
        }
    }

    /// Run platform work requested by the session
    pub(crate) fn perform_effect(&self, effect: Effect) -> Task<cosmic::Action<Message>> {
        match effect {
            Effect::RequestPermission => {
                let request = self.platform.request_permission();
                Task::perform(request, |status| {
                    cosmic::Action::App(Message::PermissionResolved(status))
                })
            }
            Effect::Capture(ticket) => {
                let capture = self.platform.capture(ticket.facing);
                Task::perform(capture, move |result| {
                    cosmic::Action::App(Message::CaptureFinished(ticket, result))
                })
            }
        }
    }
}
