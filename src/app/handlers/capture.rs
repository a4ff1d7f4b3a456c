// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles photo capture, capture results and retake.

use crate::app::session::{CaptureTicket, Control};
use crate::app::state::{AppModel, Message};
use crate::backends::camera::{BackendResult, CapturedPhoto};
use cosmic::Task;
use cosmic::widget::image;
use tracing::{error, info};

impl AppModel {
    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        match self.session.activate(Control::Capture) {
            Some(effect) => self.perform_effect(effect),
            None => Task::none(),
        }
    }

    pub(crate) fn handle_capture_finished(
        &mut self,
        ticket: CaptureTicket,
        result: BackendResult<CapturedPhoto>,
    ) -> Task<cosmic::Action<Message>> {
        self.session.complete_capture(ticket, result);
        self.photo_handle = self
            .session
            .photo()
            .map(|photo| image::Handle::from_path(photo.path()));
        Task::none()
    }

    pub(crate) fn handle_retake(&mut self) -> Task<cosmic::Action<Message>> {
        self.session.activate(Control::Retake);
        if self.session.photo().is_none() {
            self.photo_handle = None;
            self.preview_handle = None;
        }
        Task::none()
    }

    pub(crate) fn handle_open_photo_directory(&self) -> Task<cosmic::Action<Message>> {
        let directory = self.config.capture_settings().directory;
        info!(path = %directory.display(), "Opening photo directory");
        if let Err(e) = open::that_detached(&directory) {
            error!(error = %e, path = %directory.display(), "Failed to open photo directory");
        }
        Task::none()
    }
}
