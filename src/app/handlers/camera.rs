// SPDX-License-Identifier: GPL-3.0-only

//! Camera handlers
//!
//! Handles the facing toggle and frames delivered by the preview subscription.

use crate::app::session::{Control, ViewState};
use crate::app::state::{AppModel, Message};
use crate::backends::camera::PreviewFrame;
use cosmic::Task;
use cosmic::widget::image;
use std::sync::Arc;
use tracing::debug;

impl AppModel {
    pub(crate) fn handle_toggle_facing(&mut self) -> Task<cosmic::Action<Message>> {
        let before = self.session.facing();
        self.session.activate(Control::ToggleFacing);
        if self.session.facing() != before {
            // Frames from the previous camera must not linger
            self.preview_handle = None;
        }
        Task::none()
    }

    pub(crate) fn handle_preview_frame(
        &mut self,
        frame: Arc<PreviewFrame>,
    ) -> Task<cosmic::Action<Message>> {
        if !matches!(self.session.view_state(), ViewState::Live { .. }) {
            debug!("Dropping preview frame outside the live view");
            return Task::none();
        }

        self.preview_handle = Some(image::Handle::from_rgba(
            frame.width,
            frame.height,
            frame.data.to_vec(),
        ));
        Task::none()
    }
}
