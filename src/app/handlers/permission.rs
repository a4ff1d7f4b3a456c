// SPDX-License-Identifier: GPL-3.0-only

//! Permission handlers
//!
//! The platform owns the permission; these handlers only issue requests and
//! mirror the answer into the session.

use crate::app::session::Control;
use crate::app::state::{AppModel, Message};
use crate::backends::camera::PermissionStatus;
use cosmic::Task;
use tracing::info;

impl AppModel {
    /// Re-request access from the denied screen
    pub(crate) fn handle_request_permission(&mut self) -> Task<cosmic::Action<Message>> {
        match self.session.activate(Control::RequestPermission) {
            Some(effect) => {
                info!("Re-requesting camera permission");
                self.perform_effect(effect)
            }
            None => Task::none(),
        }
    }

    pub(crate) fn handle_permission_resolved(
        &mut self,
        status: PermissionStatus,
    ) -> Task<cosmic::Action<Message>> {
        self.session.resolve_permission(status);
        if !status.is_granted() {
            self.preview_handle = None;
        }
        Task::none()
    }
}
