// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for camera operations
//!
//! This module provides command-line functionality for:
//! - Reporting permission and camera status
//! - Taking a photo without the GUI

use futures::StreamExt;
use futures::channel::mpsc;
use serde::Serialize;
use snapcam::backends::camera::{
    CameraDevice, CameraLocation, CameraPlatform, CaptureSettings, Facing, PermissionStatus,
    PreviewRequest, SystemPlatform, select_device,
};
use snapcam::config::Config;
use snapcam::constants::{app_info, channels, timing};
use snapcam::errors::{AppError, PermissionError, PhotoError};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize)]
struct CameraStatus {
    name: String,
    path: String,
    location: Option<CameraLocation>,
    /// Facings this camera would be used for
    serves: Vec<Facing>,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    version: &'static str,
    runtime: &'static str,
    permission: PermissionStatus,
    cameras: Vec<CameraStatus>,
}

fn camera_statuses(cameras: &[CameraDevice]) -> Vec<CameraStatus> {
    cameras
        .iter()
        .enumerate()
        .map(|(index, camera)| CameraStatus {
            name: camera.name.clone(),
            path: camera.path.clone(),
            location: camera.location,
            serves: Facing::ALL
                .into_iter()
                .filter(|facing| select_device(cameras, *facing) == Some(index))
                .collect(),
        })
        .collect()
}

/// Print permission status and the cameras the app would use
pub fn status(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let (_, config) = Config::load();
    let platform = SystemPlatform::new(config.capture_settings());

    let permission = runtime.block_on(platform.request_permission());
    let cameras = platform.enumerate_cameras();
    let report = StatusReport {
        version: app_info::version(),
        runtime: app_info::runtime_environment(),
        permission,
        cameras: camera_statuses(&cameras),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("snapcam {} ({})", report.version, report.runtime);
    println!("Camera permission: {}", report.permission);
    if report.cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!();
    println!("Available cameras:");
    for (index, camera) in report.cameras.iter().enumerate() {
        let serves: Vec<&str> = camera.serves.iter().map(|f| f.as_str()).collect();
        println!("  [{}] {}", index, camera.name);
        println!("      Path: {}", camera.path);
        if let Some(location) = camera.location {
            println!("      Location: {:?}", location);
        }
        if !serves.is_empty() {
            println!("      Used for: {}", serves.join(", "));
        }
    }

    Ok(())
}

/// Split `--output` into the capture directory and an optional final file name
fn output_target(output: Option<&Path>, config: &Config) -> (PathBuf, Option<PathBuf>) {
    match output {
        None => (config.capture_settings().directory, None),
        Some(path) if path.is_dir() => (path.to_path_buf(), None),
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (dir, Some(path.to_path_buf()))
        }
    }
}

/// Capture settings from the saved config, redirected by `--output`
fn photo_settings(
    config: &Config,
    output: Option<&Path>,
) -> (CaptureSettings, Option<PathBuf>) {
    let (directory, rename_to) = output_target(output, config);
    let mut settings = config.capture_settings();
    settings.directory = directory;
    (settings, rename_to)
}

/// Take a photo with the camera facing `facing`
pub fn take_photo(
    facing: Facing,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, config) = Config::load();
    let (settings, rename_to) = photo_settings(&config, output.as_deref());
    let platform = SystemPlatform::new(settings);

    let runtime = tokio::runtime::Runtime::new()?;
    let photo = runtime.block_on(async {
        let permission = platform.request_permission().await;
        if !permission.is_granted() {
            return Err(AppError::Permission(PermissionError::Denied));
        }

        let (sender, mut receiver) = mpsc::channel(channels::FRAME_CHANNEL_CAPACITY);
        let preview = platform.start_preview(PreviewRequest::new(facing, false), sender)?;

        match tokio::time::timeout(timing::CLI_CAPTURE_TIMEOUT, receiver.next()).await {
            Ok(Some(_)) => {}
            _ => return Err(AppError::Photo(PhotoError::NoFrameAvailable)),
        }

        // Let auto exposure settle
        tokio::time::sleep(timing::CLI_WARMUP).await;
        info!(facing = %facing, "Capturing photo");
        let photo = platform.capture(facing).await?;
        drop(preview);
        Ok(photo)
    })?;

    let path = match rename_to {
        Some(target) => {
            std::fs::rename(&photo.path, &target).map_err(|e| {
                AppError::Photo(PhotoError::SaveFailed(format!(
                    "{} -> {}: {}",
                    photo.path.display(),
                    target.display(),
                    e
                )))
            })?;
            target
        }
        None => photo.path.clone(),
    };

    println!("Photo saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_statuses_assign_facings() {
        let cameras = vec![
            CameraDevice {
                name: "front".into(),
                path: "a".into(),
                location: Some(CameraLocation::Front),
            },
            CameraDevice {
                name: "usb".into(),
                path: "b".into(),
                location: None,
            },
        ];
        let statuses = camera_statuses(&cameras);
        assert_eq!(statuses[0].serves, vec![Facing::Front]);
        assert_eq!(statuses[1].serves, vec![Facing::Back]);
    }

    #[test]
    fn test_output_target_file_path() {
        let config = Config::default();
        let (dir, rename) = output_target(Some(Path::new("/tmp/shot.jpg")), &config);
        assert_eq!(dir, PathBuf::from("/tmp"));
        assert_eq!(rename, Some(PathBuf::from("/tmp/shot.jpg")));

        let (dir, rename) = output_target(Some(Path::new("shot.jpg")), &config);
        assert_eq!(dir, PathBuf::from("."));
        assert!(rename.is_some());

        let (dir, rename) = output_target(None, &config);
        assert_eq!(dir, config.capture_settings().directory);
        assert!(rename.is_none());
    }

    #[test]
    fn test_photo_settings_follow_saved_config() {
        let config = Config {
            jpeg_quality: 70,
            photo_directory: Some("/srv/photos".into()),
            ..Config::default()
        };

        let (settings, rename) = photo_settings(&config, None);
        assert_eq!(settings.directory, PathBuf::from("/srv/photos"));
        assert_eq!(settings.jpeg_quality, 70);
        assert!(rename.is_none());

        let (settings, rename) = photo_settings(&config, Some(Path::new("/tmp/shot.jpg")));
        assert_eq!(settings.directory, PathBuf::from("/tmp"));
        assert_eq!(settings.jpeg_quality, 70);
        assert_eq!(rename, Some(PathBuf::from("/tmp/shot.jpg")));
    }
}
