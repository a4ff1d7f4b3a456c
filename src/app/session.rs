// SPDX-License-Identifier: GPL-3.0-only

//! Photo session state machine
//!
//! Holds everything the camera screen renders from: the mirrored permission
//! status, the selected facing and the captured photo. The view is derived from
//! this state through [`PhotoSession::view_state`], so the screen always shows
//! exactly one of the permission gate, the live camera or the photo preview.
//!
//! ```text
//! AwaitingPermission ──► Denied ◄──► Live ◄──► Preview
//!          └─────────────────────────▲
//! ```
//!
//! The session never talks to the platform itself. Operations that need the
//! platform return an [`Effect`] which the caller executes and feeds back.

use crate::backends::camera::{BackendResult, CapturedPhoto, Facing, PermissionStatus};
use tracing::{debug, error, info};

/// How capture requests behave while a capture is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePolicy {
    /// Ignore new requests until the pending capture resolves
    #[default]
    Single,
    /// Start every request; the last one to resolve wins
    Overlapping,
}

/// User-activatable controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    RequestPermission,
    ToggleFacing,
    Capture,
    Retake,
}

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState<'a> {
    /// Permission not resolved yet
    AwaitingPermission,
    /// Permission refused
    Denied,
    /// Live camera preview
    Live { facing: Facing, capturing: bool },
    /// Showing a captured photo
    Preview { photo: &'a CapturedPhoto },
}

impl ViewState<'_> {
    /// Controls offered on this screen, in display order
    pub fn controls(&self) -> &'static [Control] {
        match self {
            ViewState::AwaitingPermission => &[],
            ViewState::Denied => &[Control::RequestPermission],
            ViewState::Live { .. } => &[Control::ToggleFacing, Control::Capture],
            ViewState::Preview { .. } => &[Control::Retake],
        }
    }

    pub fn offers(&self, control: Control) -> bool {
        self.controls().contains(&control)
    }
}

/// Identifies one capture request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTicket {
    pub id: u64,
    pub facing: Facing,
}

/// Platform work the caller must perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Ask the platform for camera permission
    RequestPermission,
    /// Capture a still photo and report back with the ticket
    Capture(CaptureTicket),
}

#[derive(Debug, Clone, Default)]
pub struct PhotoSession {
    permission: PermissionStatus,
    facing: Facing,
    photo: Option<CapturedPhoto>,
    policy: CapturePolicy,
    in_flight: usize,
    next_ticket: u64,
}

impl PhotoSession {
    pub fn new(policy: CapturePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Screen to render for the current state
    pub fn view_state(&self) -> ViewState<'_> {
        if let Some(photo) = &self.photo {
            return ViewState::Preview { photo };
        }
        match self.permission {
            PermissionStatus::Undetermined => ViewState::AwaitingPermission,
            PermissionStatus::Denied => ViewState::Denied,
            PermissionStatus::Granted => ViewState::Live {
                facing: self.facing,
                capturing: self.is_capturing(),
            },
        }
    }

    /// First request issued when the camera screen appears
    pub fn on_mount(&self) -> Effect {
        Effect::RequestPermission
    }

    /// Activate a control the user pressed
    ///
    /// Controls not offered on the current screen are ignored.
    pub fn activate(&mut self, control: Control) -> Option<Effect> {
        if !self.view_state().offers(control) {
            debug!(?control, "Ignoring control not offered on this screen");
            return None;
        }

        match control {
            Control::RequestPermission => Some(Effect::RequestPermission),
            Control::ToggleFacing => {
                self.toggle_facing();
                None
            }
            Control::Capture => self.begin_capture().map(Effect::Capture),
            Control::Retake => {
                self.retake();
                None
            }
        }
    }

    /// Record the platform's answer to a permission request
    pub fn resolve_permission(&mut self, status: PermissionStatus) {
        info!(%status, "Camera permission resolved");
        self.permission = status;
    }

    /// Flip between front and back camera
    pub fn toggle_facing(&mut self) -> Facing {
        self.facing = self.facing.toggled();
        debug!(facing = %self.facing, "Camera facing toggled");
        self.facing
    }

    /// Start a capture if the live view allows one
    pub fn begin_capture(&mut self) -> Option<CaptureTicket> {
        if !matches!(self.view_state(), ViewState::Live { .. }) {
            return None;
        }
        if self.policy == CapturePolicy::Single && self.in_flight > 0 {
            debug!("Capture already in progress, ignoring request");
            return None;
        }

        self.in_flight += 1;
        self.next_ticket += 1;
        let ticket = CaptureTicket {
            id: self.next_ticket,
            facing: self.facing,
        };
        debug!(ticket = ticket.id, facing = %ticket.facing, "Capture started");
        Some(ticket)
    }

    /// Apply the outcome of a capture
    ///
    /// A failure is logged and otherwise leaves the session untouched.
    pub fn complete_capture(&mut self, ticket: CaptureTicket, result: BackendResult<CapturedPhoto>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(photo) => {
                info!(ticket = ticket.id, uri = %photo.uri(), "Capture finished");
                self.photo = Some(photo);
            }
            Err(e) => {
                error!(ticket = ticket.id, error = %e, "Capture failed");
            }
        }
    }

    /// Discard the captured photo and return to the live view
    pub fn retake(&mut self) {
        if self.photo.take().is_some() {
            debug!("Photo discarded");
        }
    }

    pub fn set_policy(&mut self, policy: CapturePolicy) {
        self.policy = policy;
    }

    pub fn policy(&self) -> CapturePolicy {
        self.policy
    }

    pub fn permission(&self) -> PermissionStatus {
        self.permission
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn photo(&self) -> Option<&CapturedPhoto> {
        self.photo.as_ref()
    }

    pub fn is_capturing(&self) -> bool {
        self.in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::BackendError;
    use std::path::PathBuf;

    fn photo(name: &str) -> CapturedPhoto {
        CapturedPhoto {
            path: PathBuf::from(format!("/tmp/{}.jpg", name)),
            width: 4,
            height: 3,
            facing: Facing::Back,
        }
    }

    fn granted() -> PhotoSession {
        let mut session = PhotoSession::default();
        session.resolve_permission(PermissionStatus::Granted);
        session
    }

    #[test]
    fn test_starts_awaiting_permission_with_back_camera() {
        let session = PhotoSession::default();
        assert_eq!(session.view_state(), ViewState::AwaitingPermission);
        assert!(session.view_state().controls().is_empty());
        assert_eq!(session.facing(), Facing::Back);
        assert_eq!(session.on_mount(), Effect::RequestPermission);
    }

    #[test]
    fn test_denied_offers_only_request() {
        let mut session = PhotoSession::default();
        session.resolve_permission(PermissionStatus::Denied);
        assert_eq!(session.view_state().controls(), &[Control::RequestPermission]);
        assert_eq!(
            session.activate(Control::RequestPermission),
            Some(Effect::RequestPermission)
        );
        assert_eq!(session.activate(Control::Capture), None);
    }

    #[test]
    fn test_capture_only_from_live_view() {
        let mut session = PhotoSession::default();
        assert!(session.begin_capture().is_none());

        let mut session = granted();
        let ticket = session.begin_capture().unwrap();
        session.complete_capture(ticket, Ok(photo("a")));
        assert!(session.begin_capture().is_none());
    }

    #[test]
    fn test_single_policy_ignores_second_press() {
        let mut session = granted();
        let first = session.begin_capture().unwrap();
        assert!(session.begin_capture().is_none());
        assert!(matches!(
            session.view_state(),
            ViewState::Live { capturing: true, .. }
        ));

        session.complete_capture(first, Err(BackendError::NoFrameAvailable));
        assert!(!session.is_capturing());
        assert!(session.begin_capture().is_some());
    }

    #[test]
    fn test_overlapping_policy_last_resolution_wins() {
        let mut session = PhotoSession::new(CapturePolicy::Overlapping);
        session.resolve_permission(PermissionStatus::Granted);

        let first = session.begin_capture().unwrap();
        let second = session.begin_capture().unwrap();
        assert_ne!(first.id, second.id);

        session.complete_capture(second, Ok(photo("second")));
        session.complete_capture(first, Ok(photo("first")));
        assert_eq!(session.photo(), Some(&photo("first")));
        assert!(!session.is_capturing());
    }

    #[test]
    fn test_ticket_carries_facing_at_press_time() {
        let mut session = PhotoSession::new(CapturePolicy::Overlapping);
        session.resolve_permission(PermissionStatus::Granted);
        session.toggle_facing();
        let ticket = session.begin_capture().unwrap();
        session.toggle_facing();
        assert_eq!(ticket.facing, Facing::Front);
    }

    #[test]
    fn test_retake_without_photo_is_noop() {
        let mut session = granted();
        session.retake();
        assert!(matches!(session.view_state(), ViewState::Live { .. }));
    }
}
