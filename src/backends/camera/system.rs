// SPDX-License-Identifier: GPL-3.0-only

//! Production camera platform: XDG portal permission plus GStreamer preview

use super::pipeline::{self, GstPreview, LatestFrame};
use super::portal;
use super::types::*;
use super::{CameraPlatform, CaptureSettings, PreviewSession};
use crate::constants::app_info;
use crate::errors::PermissionError;
use crate::storage;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, error, info, warn};

/// Camera platform backed by the desktop portal and GStreamer
pub struct SystemPlatform {
    permission: Arc<Mutex<PermissionStatus>>,
    latest: LatestFrame,
    settings: Arc<RwLock<CaptureSettings>>,
}

impl SystemPlatform {
    pub fn new(settings: CaptureSettings) -> Self {
        if let Err(e) = pipeline::init() {
            error!(error = %e, "GStreamer initialisation failed");
        }

        Self {
            permission: Arc::new(Mutex::new(PermissionStatus::Undetermined)),
            latest: Arc::new(Mutex::new(None)),
            settings: Arc::new(RwLock::new(settings)),
        }
    }
}

/// Resolve permission when the portal could not be asked
async fn fallback_permission(reason: PermissionError) -> PermissionStatus {
    if app_info::is_flatpak() {
        warn!(error = %reason, "Camera portal unavailable inside sandbox, denying access");
        return PermissionStatus::Denied;
    }

    let cameras = tokio::task::spawn_blocking(pipeline::enumerate_cameras)
        .await
        .unwrap_or_default();
    if cameras.is_empty() {
        warn!(error = %reason, "Camera portal unavailable and no camera found");
        PermissionStatus::Denied
    } else {
        info!(
            error = %reason,
            cameras = cameras.len(),
            "Camera portal unavailable, using direct device access"
        );
        PermissionStatus::Granted
    }
}

impl CameraPlatform for SystemPlatform {
    fn permission_status(&self) -> PermissionStatus {
        self.permission
            .lock()
            .map(|status| *status)
            .unwrap_or_default()
    }

    fn request_permission(&self) -> BoxFuture<'static, PermissionStatus> {
        let permission = Arc::clone(&self.permission);
        async move {
            let current = permission.lock().map(|s| *s).unwrap_or_default();
            if current.is_granted() {
                debug!("Camera permission already granted");
                return current;
            }

            let status = match portal::is_camera_present().await {
                Ok(false) => {
                    let reason =
                        PermissionError::PortalUnavailable("portal reports no camera".to_string());
                    fallback_permission(reason).await
                }
                _ => match portal::request_camera_access().await {
                    Ok(status) => status,
                    Err(reason) => fallback_permission(reason).await,
                },
            };

            if let Ok(mut slot) = permission.lock() {
                *slot = status;
            }
            status
        }
        .boxed()
    }

    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        pipeline::enumerate_cameras()
    }

    fn start_preview(
        &self,
        request: PreviewRequest,
        frames: FrameSender,
    ) -> BackendResult<Box<dyn PreviewSession>> {
        if !self.permission_status().is_granted() {
            return Err(BackendError::PermissionDenied);
        }
        let preview = GstPreview::start(request, frames, Arc::clone(&self.latest))?;
        Ok(Box::new(preview))
    }

    fn capture(&self, facing: Facing) -> BoxFuture<'static, BackendResult<CapturedPhoto>> {
        let frame = self.latest.lock().ok().and_then(|slot| match slot.as_ref() {
            Some((frame_facing, frame)) if *frame_facing == facing => Some(frame.clone()),
            _ => None,
        });
        let settings = self
            .settings
            .read()
            .map(|s| s.clone())
            .map_err(|e| BackendError::Other(e.to_string()));

        async move {
            let settings = settings?;
            let frame = frame.ok_or(BackendError::NoFrameAvailable)?;
            info!(
                facing = %facing,
                width = frame.width,
                height = frame.height,
                "Capturing photo"
            );

            tokio::task::spawn_blocking(move || {
                storage::save_photo(&frame, &settings.directory, settings.jpeg_quality, facing)
            })
            .await
            .map_err(|e| BackendError::Other(format!("Capture task failed: {}", e)))?
        }
        .boxed()
    }

    fn apply_capture_settings(&self, settings: CaptureSettings) {
        debug!(
            directory = %settings.directory.display(),
            quality = settings.jpeg_quality,
            "Updating capture settings"
        );
        if let Ok(mut slot) = self.settings.write() {
            *slot = settings;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn platform_with(
        latest: Option<(Facing, PreviewFrame)>,
        directory: PathBuf,
    ) -> SystemPlatform {
        SystemPlatform {
            permission: Arc::new(Mutex::new(PermissionStatus::Granted)),
            latest: Arc::new(Mutex::new(latest)),
            settings: Arc::new(RwLock::new(CaptureSettings {
                directory,
                jpeg_quality: 80,
            })),
        }
    }

    fn frame() -> PreviewFrame {
        PreviewFrame::from_strided(4, 2, 16, &[120u8; 32]).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("snapcam-system-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn test_capture_without_frame_fails() {
        let dir = scratch_dir("empty");
        let platform = platform_with(None, dir.clone());

        let result = platform.capture(Facing::Back).await;
        assert_eq!(result, Err(BackendError::NoFrameAvailable));
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_capture_ignores_frame_from_other_facing() {
        let dir = scratch_dir("other");
        let platform = platform_with(Some((Facing::Back, frame())), dir.clone());

        let result = platform.capture(Facing::Front).await;
        assert_eq!(result, Err(BackendError::NoFrameAvailable));
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_capture_saves_matching_frame() {
        let dir = scratch_dir("match");
        let platform = platform_with(Some((Facing::Front, frame())), dir.clone());

        let photo = platform.capture(Facing::Front).await.unwrap();
        assert!(photo.path.starts_with(&dir));
        assert_eq!((photo.width, photo.height, photo.facing), (4, 2, Facing::Front));
        assert!(photo.path.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
