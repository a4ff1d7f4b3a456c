// SPDX-License-Identifier: MPL-2.0

//! GStreamer camera enumeration and preview pipeline
//!
//! Cameras are discovered with a `DeviceMonitor`, so PipeWire and V4L2 sources
//! both work without parsing tool output. The preview pipeline is
//!
//! ```text
//! <device source> ! decodebin ! videoconvert ! video/x-raw,format=RGBA ! appsink
//! ```
//!
//! Every frame is stored as the latest raw frame (used for still capture) and a
//! display copy, mirrored if requested, is pushed to the UI channel.

use super::types::*;
use super::{PreviewSession, select_device};
use crate::constants::{pipeline, timing};
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Most recent raw frame and the facing it was captured with
pub type LatestFrame = Arc<Mutex<Option<(Facing, PreviewFrame)>>>;

/// Drop the latest frame if it came from `facing`
///
/// A preview that stops must not discard a frame another preview already stored.
fn clear_latest_for(latest: &LatestFrame, facing: Facing) {
    if let Ok(mut slot) = latest.lock()
        && slot.as_ref().is_some_and(|(stored, _)| *stored == facing)
    {
        *slot = None;
    }
}

/// Initialise GStreamer once; later calls are cheap
pub fn init() -> BackendResult<()> {
    gstreamer::init().map_err(|e| BackendError::NotAvailable(e.to_string()))
}

/// Read a device property as a string regardless of its GLib type
fn property_string(props: &gstreamer::StructureRef, key: &str) -> Option<String> {
    let value = props.value(key).ok()?;
    if let Ok(s) = value.get::<String>() {
        return Some(s);
    }
    value.transform::<String>().ok()?.get::<String>().ok()
}

/// Describe a GStreamer device as a [`CameraDevice`]
fn describe_device(device: &gstreamer::Device) -> CameraDevice {
    let props = device.properties();
    let props = props.as_deref();

    let location = props
        .and_then(|p| property_string(p, "api.libcamera.location"))
        .and_then(|loc| CameraLocation::from_property(&loc));

    let path = props
        .and_then(|p| {
            property_string(p, "object.serial")
                .map(|serial| format!("pipewire-serial-{}", serial))
                .or_else(|| property_string(p, "api.v4l2.path"))
                .or_else(|| property_string(p, "device.path"))
        })
        .unwrap_or_default();

    CameraDevice {
        name: device.display_name().to_string(),
        path,
        location,
    }
}

/// Enumerate video sources with their GStreamer device handles
pub fn enumerate_devices() -> BackendResult<Vec<(CameraDevice, gstreamer::Device)>> {
    init()?;

    let monitor = gstreamer::DeviceMonitor::new();
    monitor.add_filter(Some(pipeline::VIDEO_SOURCE_CLASS), None);
    monitor
        .start()
        .map_err(|e| BackendError::NotAvailable(format!("Device monitor failed: {}", e)))?;
    let devices: Vec<(CameraDevice, gstreamer::Device)> = monitor
        .devices()
        .into_iter()
        .map(|device| (describe_device(&device), device))
        .collect();
    monitor.stop();

    debug!(count = devices.len(), "Enumerated video sources");
    Ok(devices)
}

/// Enumerate cameras, logging instead of failing
pub fn enumerate_cameras() -> Vec<CameraDevice> {
    match enumerate_devices() {
        Ok(devices) => devices.into_iter().map(|(camera, _)| camera).collect(),
        Err(e) => {
            warn!(error = %e, "Camera enumeration failed");
            Vec::new()
        }
    }
}

/// Live preview pipeline for one camera
pub struct GstPreview {
    pipeline: gstreamer::Pipeline,
    facing: Facing,
    latest: LatestFrame,
    stopped: bool,
}

impl GstPreview {
    /// Start a preview on the camera best matching `request.facing`
    pub fn start(
        request: PreviewRequest,
        frames: FrameSender,
        latest: LatestFrame,
    ) -> BackendResult<Self> {
        let devices = enumerate_devices()?;
        let cameras: Vec<CameraDevice> = devices.iter().map(|(c, _)| c.clone()).collect();
        let index = select_device(&cameras, request.facing).ok_or_else(|| {
            BackendError::DeviceNotFound(format!("no camera for {} facing", request.facing))
        })?;
        let (camera, device) = &devices[index];

        info!(
            camera = %camera.name,
            path = %camera.path,
            facing = %request.facing,
            mirror = request.should_mirror(),
            "Creating preview pipeline"
        );

        let pipeline = build_pipeline(device, request, frames, Arc::clone(&latest))?;
        pipeline.set_state(gstreamer::State::Playing).map_err(|e| {
            let _ = pipeline.set_state(gstreamer::State::Null);
            BackendError::InitializationFailed(format!("Failed to start pipeline: {}", e))
        })?;

        Ok(Self {
            pipeline,
            facing: request.facing,
            latest,
            stopped: false,
        })
    }
}

impl PreviewSession for GstPreview {
    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        info!(facing = %self.facing, "Stopping preview pipeline");
        if let Err(e) = self.pipeline.set_state(gstreamer::State::Null) {
            error!(error = %e, "Failed to stop preview pipeline");
        }
        clear_latest_for(&self.latest, self.facing);
    }
}

impl Drop for GstPreview {
    fn drop(&mut self) {
        self.stop();
    }
}

fn make_element(factory: &str) -> BackendResult<gstreamer::Element> {
    gstreamer::ElementFactory::make(factory)
        .build()
        .map_err(|e| BackendError::InitializationFailed(format!("{} unavailable: {}", factory, e)))
}

fn build_pipeline(
    device: &gstreamer::Device,
    request: PreviewRequest,
    mut frames: FrameSender,
    latest: LatestFrame,
) -> BackendResult<gstreamer::Pipeline> {
    let link_err = |e: gstreamer::glib::BoolError| {
        BackendError::InitializationFailed(format!("Failed to link pipeline: {}", e))
    };

    let source = device
        .create_element(Some("source"))
        .map_err(|e| BackendError::InitializationFailed(e.to_string()))?;
    let decode = make_element("decodebin")?;
    let convert = make_element("videoconvert")?;

    let caps = gstreamer::Caps::builder("video/x-raw")
        .field("format", pipeline::OUTPUT_FORMAT)
        .build();
    let appsink = AppSink::builder()
        .name("sink")
        .caps(&caps)
        .max_buffers(pipeline::MAX_BUFFERS)
        .drop(true)
        .sync(false)
        .build();

    let gst_pipeline = gstreamer::Pipeline::with_name("snapcam-preview");
    gst_pipeline
        .add_many([&source, &decode, &convert, appsink.upcast_ref()])
        .map_err(link_err)?;
    source.link(&decode).map_err(link_err)?;
    convert.link(&appsink).map_err(link_err)?;

    // decodebin exposes its pad once the stream type is known
    let convert_weak = convert.downgrade();
    decode.connect_pad_added(move |_, src_pad| {
        let Some(convert) = convert_weak.upgrade() else {
            return;
        };
        let Some(sink_pad) = convert.static_pad("sink") else {
            return;
        };
        if sink_pad.is_linked() {
            return;
        }
        match src_pad.link(&sink_pad) {
            Ok(_) => debug!("Linked decoder to converter"),
            Err(e) => warn!(error = ?e, "Failed to link decoder pad"),
        }
    });

    let facing = request.facing;
    let mirror = request.should_mirror();
    appsink.set_callbacks(
        gstreamer_app::AppSinkCallbacks::builder()
            .new_sample(move |sink| {
                let sample = sink.pull_sample().map_err(|_| gstreamer::FlowError::Eos)?;
                let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;
                let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
                let info =
                    VideoInfo::from_caps(caps).map_err(|_| gstreamer::FlowError::NotNegotiated)?;
                let map = buffer
                    .map_readable()
                    .map_err(|_| gstreamer::FlowError::Error)?;

                let stride = info.stride()[0].max(0) as usize;
                let Some(frame) =
                    PreviewFrame::from_strided(info.width(), info.height(), stride, map.as_slice())
                else {
                    warn!(
                        width = info.width(),
                        height = info.height(),
                        "Dropping truncated frame"
                    );
                    return Ok(gstreamer::FlowSuccess::Ok);
                };

                let count = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);
                if count % timing::FRAME_LOG_INTERVAL == 0 {
                    debug!(
                        frame = count,
                        width = frame.width,
                        height = frame.height,
                        "Preview frame"
                    );
                }

                let display = if mirror { frame.mirrored() } else { frame.clone() };
                if let Ok(mut slot) = latest.lock() {
                    *slot = Some((facing, frame));
                }

                // Dropping frames is fine for live preview - we want the latest frame
                if let Err(e) = frames.try_send(display) {
                    if e.is_disconnected() {
                        debug!("Preview receiver closed");
                        return Err(gstreamer::FlowError::Eos);
                    }
                }
                Ok(gstreamer::FlowSuccess::Ok)
            })
            .build(),
    );

    Ok(gst_pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> PreviewFrame {
        PreviewFrame::from_strided(1, 1, 4, &[9, 9, 9, 9]).unwrap()
    }

    #[test]
    fn test_clear_latest_keeps_other_facing() {
        let latest: LatestFrame = Arc::new(Mutex::new(Some((Facing::Front, frame()))));

        clear_latest_for(&latest, Facing::Back);
        assert!(matches!(*latest.lock().unwrap(), Some((Facing::Front, _))));

        clear_latest_for(&latest, Facing::Front);
        assert!(latest.lock().unwrap().is_none());
    }
}
