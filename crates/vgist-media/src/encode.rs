//! JPEG compression and base64 encoding of captured frames.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageEncoder};
use vgist_models::{EncodedFrame, JPEG_QUALITY};

use crate::decoder::RawFrame;
use crate::error::{MediaError, MediaResult};

/// Compress a raw RGB frame to JPEG at the fixed quality factor and wrap the
/// bytes in a base64 payload. Deterministic for identical input pixels.
pub fn encode_frame(frame: &RawFrame) -> MediaResult<EncodedFrame> {
    let expected = frame.width as usize * frame.height as usize * 3;
    if frame.data.len() != expected {
        return Err(MediaError::encoding(format!(
            "pixel buffer is {} bytes, expected {} for {}x{} RGB",
            frame.data.len(),
            expected,
            frame.width,
            frame.height
        )));
    }

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .write_image(&frame.data, frame.width, frame.height, ColorType::Rgb8)
        .map_err(|e| MediaError::encoding(e.to_string()))?;

    Ok(EncodedFrame::jpeg(STANDARD.encode(&jpeg)))
}
