// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the photo session against a scripted camera platform

use futures::FutureExt;
use futures::future::BoxFuture;
use snapcam::backends::camera::{
    BackendError, BackendResult, CameraDevice, CameraPlatform, CapturedPhoto, Facing,
    FrameSender, PermissionStatus, PreviewRequest, PreviewSession,
};
use snapcam::{CapturePolicy, Control, Effect, PhotoSession, ViewState};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Camera platform answering from scripted results
struct FakePlatform {
    permission_answers: Mutex<VecDeque<PermissionStatus>>,
    capture_results: Mutex<VecDeque<BackendResult<CapturedPhoto>>>,
    permission_requests: AtomicUsize,
    captures: Mutex<Vec<Facing>>,
}

struct NoopPreview;

impl PreviewSession for NoopPreview {
    fn stop(&mut self) {}
}

impl FakePlatform {
    fn new(answers: &[PermissionStatus]) -> Self {
        Self {
            permission_answers: Mutex::new(answers.iter().copied().collect()),
            capture_results: Mutex::new(VecDeque::new()),
            permission_requests: AtomicUsize::new(0),
            captures: Mutex::new(Vec::new()),
        }
    }

    fn with_captures(self, results: Vec<BackendResult<CapturedPhoto>>) -> Self {
        *self.capture_results.lock().unwrap() = results.into();
        self
    }

    fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }
}

impl CameraPlatform for FakePlatform {
    fn permission_status(&self) -> PermissionStatus {
        PermissionStatus::Undetermined
    }

    fn request_permission(&self) -> BoxFuture<'static, PermissionStatus> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        let answer = self
            .permission_answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(PermissionStatus::Denied);
        async move { answer }.boxed()
    }

    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        Vec::new()
    }

    fn start_preview(
        &self,
        _request: PreviewRequest,
        _frames: FrameSender,
    ) -> BackendResult<Box<dyn PreviewSession>> {
        Ok(Box::new(NoopPreview))
    }

    fn capture(&self, facing: Facing) -> BoxFuture<'static, BackendResult<CapturedPhoto>> {
        self.captures.lock().unwrap().push(facing);
        let result = self
            .capture_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(BackendError::NoFrameAvailable));
        async move { result }.boxed()
    }
}

fn photo(name: &str, facing: Facing) -> CapturedPhoto {
    CapturedPhoto {
        path: PathBuf::from(format!("/tmp/snapcam/{}.jpg", name)),
        width: 640,
        height: 480,
        facing,
    }
}

/// Execute an effect against the platform and feed the result back
async fn run(session: &mut PhotoSession, platform: &FakePlatform, effect: Effect) {
    match effect {
        Effect::RequestPermission => {
            let status = platform.request_permission().await;
            session.resolve_permission(status);
        }
        Effect::Capture(ticket) => {
            let result = platform.capture(ticket.facing).await;
            session.complete_capture(ticket, result);
        }
    }
}

async fn mounted(platform: &FakePlatform) -> PhotoSession {
    let mut session = PhotoSession::default();
    let effect = session.on_mount();
    run(&mut session, platform, effect).await;
    session
}

#[test]
fn test_undetermined_offers_no_controls() {
    let session = PhotoSession::default();
    assert_eq!(session.view_state(), ViewState::AwaitingPermission);
    assert!(session.view_state().controls().is_empty());
}

#[tokio::test]
async fn test_denied_offers_single_request_control() {
    let platform = FakePlatform::new(&[PermissionStatus::Denied, PermissionStatus::Granted]);
    let mut session = mounted(&platform).await;

    assert_eq!(session.view_state(), ViewState::Denied);
    assert_eq!(session.view_state().controls(), &[Control::RequestPermission]);
    assert_eq!(platform.permission_requests(), 1);

    let effect = session.activate(Control::RequestPermission).unwrap();
    run(&mut session, &platform, effect).await;

    assert_eq!(platform.permission_requests(), 2);
    assert!(matches!(session.view_state(), ViewState::Live { .. }));
}

#[tokio::test]
async fn test_denial_can_be_retried_repeatedly() {
    let platform = FakePlatform::new(&[PermissionStatus::Denied; 4]);
    let mut session = mounted(&platform).await;

    for _ in 0..3 {
        let effect = session.activate(Control::RequestPermission).unwrap();
        run(&mut session, &platform, effect).await;
        assert_eq!(session.view_state(), ViewState::Denied);
    }
    assert_eq!(platform.permission_requests(), 4);
}

#[tokio::test]
async fn test_granted_offers_toggle_and_capture() {
    let platform = FakePlatform::new(&[PermissionStatus::Granted]);
    let session = mounted(&platform).await;

    assert_eq!(
        session.view_state(),
        ViewState::Live {
            facing: Facing::Back,
            capturing: false
        }
    );
    assert_eq!(
        session.view_state().controls(),
        &[Control::ToggleFacing, Control::Capture]
    );
}

#[tokio::test]
async fn test_toggle_parity() {
    let platform = FakePlatform::new(&[PermissionStatus::Granted]);
    let mut session = mounted(&platform).await;

    for n in 1..=7 {
        assert_eq!(session.activate(Control::ToggleFacing), None);
        let expected = if n % 2 == 0 { Facing::Back } else { Facing::Front };
        assert_eq!(session.facing(), expected, "after {} toggles", n);
    }
}

#[tokio::test]
async fn test_successful_capture_shows_returned_photo() {
    let expected = photo("IMG_20240101_120000_000", Facing::Front);
    let platform = FakePlatform::new(&[PermissionStatus::Granted])
        .with_captures(vec![Ok(expected.clone())]);
    let mut session = mounted(&platform).await;

    session.activate(Control::ToggleFacing);
    let effect = session.activate(Control::Capture).unwrap();
    run(&mut session, &platform, effect).await;

    assert_eq!(*platform.captures.lock().unwrap(), vec![Facing::Front]);
    match session.view_state() {
        ViewState::Preview { photo } => {
            assert_eq!(photo, &expected);
            assert_eq!(photo.uri(), "file:///tmp/snapcam/IMG_20240101_120000_000.jpg");
        }
        other => panic!("expected preview, got {:?}", other),
    }
    assert_eq!(session.view_state().controls(), &[Control::Retake]);
}

#[tokio::test]
async fn test_retake_returns_to_live_view() {
    let platform = FakePlatform::new(&[PermissionStatus::Granted])
        .with_captures(vec![Ok(photo("a", Facing::Back))]);
    let mut session = mounted(&platform).await;

    let effect = session.activate(Control::Capture).unwrap();
    run(&mut session, &platform, effect).await;
    assert!(session.photo().is_some());

    assert_eq!(session.activate(Control::Retake), None);
    assert!(session.photo().is_none());
    assert!(matches!(session.view_state(), ViewState::Live { .. }));
}

#[tokio::test]
async fn test_failed_capture_keeps_live_view() {
    let platform = FakePlatform::new(&[PermissionStatus::Granted]).with_captures(vec![Err(
        BackendError::EncodingFailed("disk full".to_string()),
    )]);
    let mut session = mounted(&platform).await;
    let facing_before = session.facing();

    let effect = session.activate(Control::Capture).unwrap();
    run(&mut session, &platform, effect).await;

    assert!(session.photo().is_none());
    assert_eq!(session.facing(), facing_before);
    assert_eq!(
        session.view_state(),
        ViewState::Live {
            facing: facing_before,
            capturing: false
        }
    );
}

#[tokio::test]
async fn test_capture_guard_ignores_presses_while_pending() {
    let platform = FakePlatform::new(&[PermissionStatus::Granted])
        .with_captures(vec![Ok(photo("only", Facing::Back))]);
    let mut session = mounted(&platform).await;
    assert_eq!(session.policy(), CapturePolicy::Single);

    let effect = session.activate(Control::Capture).unwrap();
    assert_eq!(session.activate(Control::Capture), None);
    assert!(session.is_capturing());

    run(&mut session, &platform, effect).await;
    assert_eq!(platform.captures.lock().unwrap().len(), 1);
    assert!(!session.is_capturing());
}

#[tokio::test]
async fn test_controls_not_offered_are_ignored() {
    let platform = FakePlatform::new(&[PermissionStatus::Granted]);
    let mut session = PhotoSession::default();

    assert_eq!(session.activate(Control::Capture), None);
    assert_eq!(session.activate(Control::ToggleFacing), None);
    assert_eq!(session.facing(), Facing::Back);

    let effect = session.on_mount();
    run(&mut session, &platform, effect).await;
    assert_eq!(session.activate(Control::RequestPermission), None);
}
