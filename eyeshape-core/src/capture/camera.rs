//! Live camera capture as a scoped resource.
//!
//! A [`LiveSession`] owns the hardware tracks of one camera stream. Tracks
//! are stopped on every exit path: explicit [`LiveSession::end`], a
//! successful [`LiveSession::snapshot`], or the session being dropped.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, RgbaImage};
use tracing::{info, warn};

use super::CapturedImage;
use crate::error::{EyeShapeError, Result};

/// JPEG quality used for camera snapshots.
pub const SNAPSHOT_JPEG_QUALITY: u8 = 95;

/// One hardware track of a media stream.
pub trait CameraTrack {
    fn stop(&self);
    fn is_live(&self) -> bool;
}

/// Source of user-facing camera streams.
#[allow(async_fn_in_trait)]
pub trait CameraDevice {
    type Track: CameraTrack;

    /// Request exclusive access to the user-facing camera.
    async fn open_user_facing(&self) -> std::result::Result<Vec<Self::Track>, String>;
}

/// A still RGBA frame grabbed at the stream's native resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }
}

/// An open camera stream.
pub struct LiveSession<T: CameraTrack> {
    tracks: Vec<T>,
}

impl<T: CameraTrack> LiveSession<T> {
    pub fn new(tracks: Vec<T>) -> Self {
        Self { tracks }
    }

    pub fn is_active(&self) -> bool {
        self.tracks.iter().any(|t| t.is_live())
    }

    /// Stop every track. Safe to call more than once.
    pub fn end(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        for track in &self.tracks {
            track.stop();
        }
        info!("Camera released ({} track(s))", self.tracks.len());
        self.tracks.clear();
    }

    /// Encode `frame` as a JPEG still and close the camera.
    ///
    /// The camera is released whether or not encoding succeeds.
    pub fn snapshot(mut self, frame: &Frame) -> Result<CapturedImage> {
        self.end();
        let bytes = encode_frame_jpeg(frame)?;
        let file_name = format!("selfie_{}.jpg", chrono::Utc::now().timestamp_millis());
        info!(
            "Captured snapshot {}x{} ({} bytes)",
            frame.width,
            frame.height,
            bytes.len()
        );
        Ok(CapturedImage {
            file_name,
            mime_type: "image/jpeg".to_string(),
            bytes,
        })
    }
}

impl<T: CameraTrack> Drop for LiveSession<T> {
    fn drop(&mut self) {
        self.end();
    }
}

/// Open the user-facing camera.
pub async fn begin_live_capture<D: CameraDevice>(device: &D) -> Result<LiveSession<D::Track>> {
    match device.open_user_facing().await {
        Ok(tracks) if tracks.is_empty() => {
            warn!("Camera opened with no video tracks");
            Err(EyeShapeError::DeviceUnavailable(
                "no video track available".to_string(),
            ))
        }
        Ok(tracks) => {
            info!("Camera opened ({} track(s))", tracks.len());
            Ok(LiveSession::new(tracks))
        }
        Err(e) => {
            warn!("Camera unavailable: {}", e);
            Err(EyeShapeError::DeviceUnavailable(e))
        }
    }
}

/// Encode an RGBA frame as JPEG at [`SNAPSHOT_JPEG_QUALITY`].
fn encode_frame_jpeg(frame: &Frame) -> Result<Vec<u8>> {
    if frame.width == 0 || frame.height == 0 {
        return Err(EyeShapeError::Encoding(format!(
            "empty frame {}x{}",
            frame.width, frame.height
        )));
    }
    let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone()).ok_or_else(
        || {
            EyeShapeError::Encoding(format!(
                "frame buffer of {} bytes does not match {}x{}",
                frame.rgba.len(),
                frame.width,
                frame.height
            ))
        },
    )?;
    let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, SNAPSHOT_JPEG_QUALITY)
        .encode(rgb.as_raw(), frame.width, frame.height, ExtendedColorType::Rgb8)
        .map_err(|e| EyeShapeError::Encoding(format!("Failed to encode snapshot: {}", e)))?;
    Ok(buffer)
}
