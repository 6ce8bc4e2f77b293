//! Encoded still frames.

use serde::{Deserialize, Serialize};

/// MIME type of every encoded frame.
pub const FRAME_MIME_TYPE: &str = "image/jpeg";

/// JPEG quality factor (0-100 scale, equivalent to 0.8 on a 0-1 scale).
pub const JPEG_QUALITY: u8 = 80;

/// A compressed still image sampled from a video, base64-encoded for
/// transport inside a multimodal request.
///
/// Frames are immutable once produced; a `Vec<EncodedFrame>` is always in
/// capture order, which equals chronological order in the source video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedFrame {
    /// MIME type of the compressed image ("image/jpeg")
    pub mime_type: String,
    /// Base64 payload of the compressed image bytes
    pub data: String,
}

impl EncodedFrame {
    /// Create a JPEG frame from an already base64-encoded payload.
    pub fn jpeg(data: impl Into<String>) -> Self {
        Self {
            mime_type: FRAME_MIME_TYPE.to_string(),
            data: data.into(),
        }
    }
}
