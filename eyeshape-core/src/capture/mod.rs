//! Image capture: file uploads and live camera snapshots, normalized into
//! one [`CapturedImage`] representation.

pub mod camera;

use image::ImageFormat;
use tracing::{info, warn};

use crate::error::{EyeShapeError, Result};

pub use camera::{begin_live_capture, CameraDevice, CameraTrack, Frame, LiveSession};

/// A still image ready for encoding. Owns its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl CapturedImage {
    /// Accept a user-selected file.
    ///
    /// Rejects anything whose declared content type is not `image/*`. When the
    /// browser declares no type at all, the bytes are sniffed instead.
    pub fn from_upload(
        file_name: impl Into<String>,
        declared_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let file_name = file_name.into();
        let mime_type = match Self::check_declared_type(&file_name, declared_type)? {
            Some(declared) => declared,
            None => sniff_mime_type(&bytes).ok_or_else(|| {
                warn!("Rejected upload '{}': unrecognised content", file_name);
                EyeShapeError::InvalidMediaType(format!("{} (unknown type)", file_name))
            })?,
        };

        info!(
            "Accepted upload '{}' ({}, {} bytes)",
            file_name,
            mime_type,
            bytes.len()
        );
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Check a declared content type before any bytes are read.
    ///
    /// Returns the normalised type, or `None` when nothing was declared and
    /// the bytes will have to be sniffed.
    pub fn check_declared_type(file_name: &str, declared_type: &str) -> Result<Option<String>> {
        let declared = declared_type.trim().to_ascii_lowercase();
        if declared.is_empty() {
            Ok(None)
        } else if declared.starts_with("image/") {
            Ok(Some(declared))
        } else {
            warn!("Rejected upload '{}': type {}", file_name, declared);
            Err(EyeShapeError::InvalidMediaType(declared))
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Detect an image format from magic bytes.
fn sniff_mime_type(bytes: &[u8]) -> Option<String> {
    image::guess_format(bytes)
        .ok()
        .map(|format: ImageFormat| format.to_mime_type().to_string())
        .filter(|mime| mime.starts_with("image/"))
}
