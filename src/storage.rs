// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for captured photos

use crate::backends::camera::{BackendError, BackendResult, CapturedPhoto, Facing, PreviewFrame};
use crate::constants::photo;
use chrono::{DateTime, Local};
use image::codecs::jpeg::JpegEncoder;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default photo directory (`$XDG_PICTURES_DIR/snapcam`, falling back to `~/Pictures/snapcam`)
pub fn default_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(photo::DIRECTORY_NAME)
}

/// Resolve the photo directory from an optional configured override
pub fn photo_directory(configured: Option<&str>) -> PathBuf {
    match configured.map(str::trim) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => default_photo_directory(),
    }
}

/// File name for a photo taken at `timestamp`
pub fn photo_file_name(timestamp: DateTime<Local>) -> String {
    format!(
        "{}{}.jpg",
        photo::FILE_PREFIX,
        timestamp.format("%Y%m%d_%H%M%S_%3f")
    )
}

/// First free path for a photo taken at `timestamp` inside `directory`
pub fn unique_photo_path(directory: &Path, timestamp: DateTime<Local>) -> PathBuf {
    let name = photo_file_name(timestamp);
    let candidate = directory.join(&name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = name.trim_end_matches(".jpg");
    (1u32..)
        .map(|n| directory.join(format!("{}-{}.jpg", stem, n)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Encode a frame as JPEG into `directory`
///
/// Blocking; run it off the UI thread.
pub fn save_photo(
    frame: &PreviewFrame,
    directory: &Path,
    quality: u8,
    facing: Facing,
) -> BackendResult<CapturedPhoto> {
    std::fs::create_dir_all(directory)?;
    let path = unique_photo_path(directory, Local::now());

    let rgba = image::RgbaImage::from_raw(frame.width, frame.height, frame.data.to_vec())
        .ok_or_else(|| {
            BackendError::EncodingFailed(format!(
                "frame buffer does not match {}x{}",
                frame.width, frame.height
            ))
        })?;
    let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();

    debug!(path = %path.display(), quality, "Encoding JPEG");
    let file = std::fs::File::create(&path)?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100))
        .encode_image(&rgb)
        .map_err(|e| BackendError::EncodingFailed(e.to_string()))?;
    writer.flush()?;

    info!(path = %path.display(), width = frame.width, height = frame.height, "Photo saved");
    Ok(CapturedPhoto {
        path,
        width: frame.width,
        height: frame.height,
        facing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("snapcam-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_photo_file_name_format() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(photo_file_name(ts), "IMG_20240309_140507_000.jpg");
    }

    #[test]
    fn test_photo_directory_override() {
        assert_eq!(photo_directory(Some("/srv/photos")), PathBuf::from("/srv/photos"));
        assert_eq!(photo_directory(Some("  ")), default_photo_directory());
        assert_eq!(photo_directory(None), default_photo_directory());
        assert!(default_photo_directory().ends_with(photo::DIRECTORY_NAME));
    }

    #[test]
    fn test_unique_photo_path_skips_existing() {
        let dir = scratch_dir("unique");
        std::fs::create_dir_all(&dir).unwrap();
        let ts = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let first = unique_photo_path(&dir, ts);
        std::fs::write(&first, b"x").unwrap();
        let second = unique_photo_path(&dir, ts);

        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("-1.jpg"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_photo_writes_jpeg() {
        let dir = scratch_dir("save");
        let data = vec![200u8; 8 * 6 * 4];
        let frame = PreviewFrame::from_strided(8, 6, 8 * 4, &data).unwrap();

        let photo = save_photo(&frame, &dir, 90, Facing::Front).unwrap();
        assert!(photo.path.starts_with(&dir));
        assert_eq!((photo.width, photo.height), (8, 6));
        assert_eq!(photo.facing, Facing::Front);

        let decoded = image::open(&photo.path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
