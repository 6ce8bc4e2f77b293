//! Evenly spaced frame sampling.
//!
//! The sampler drives a capture source sequentially over N computed
//! timestamps, encodes each captured picture, and tolerates per-frame
//! failures: a failed capture or encode is logged and skipped, and the batch
//! only fails as a whole when nothing at all could be collected.

use async_trait::async_trait;
use tracing::{debug, warn};
use vgist_models::EncodedFrame;

use crate::decoder::{RawFrame, VideoHandle};
use crate::encode::encode_frame;
use crate::error::{MediaError, MediaResult};

/// A source of still pictures addressable by timestamp.
///
/// One implementor owns one playback head, so captures take `&mut self` and
/// must be driven one at a time.
#[async_trait]
pub trait FrameCapture {
    /// Total duration of the timeline, in seconds.
    fn duration_seconds(&self) -> f64;

    /// Seek to the timestamp and capture the picture displayed there.
    async fn seek_and_capture(&mut self, timestamp_seconds: f64) -> MediaResult<RawFrame>;
}

#[async_trait]
impl FrameCapture for VideoHandle {
    fn duration_seconds(&self) -> f64 {
        self.metadata().map_or(0.0, |m| m.duration_seconds)
    }

    async fn seek_and_capture(&mut self, timestamp_seconds: f64) -> MediaResult<RawFrame> {
        VideoHandle::seek_and_capture(self, timestamp_seconds).await
    }
}

/// Compute `count` evenly spaced timestamps over `duration_seconds`.
///
/// Timestamps are `i * duration / count` for `i` in `0..count` — the final
/// instant is deliberately never reached, since decoders commonly cannot
/// retrieve a picture exactly at end-of-stream.
pub fn sample_timestamps(duration_seconds: f64, count: usize) -> Vec<f64> {
    let interval = duration_seconds / count as f64;
    (0..count).map(|i| i as f64 * interval).collect()
}

/// Sample up to `frame_count` encoded frames from a capture source.
///
/// Captures run strictly sequentially. A frame whose capture or encode fails
/// is skipped without retry or placeholder; the collected sequence keeps
/// capture order. Returns `EmptyFrameSet` when every attempt failed.
pub async fn sample_frames<C: FrameCapture + Send>(
    source: &mut C,
    frame_count: usize,
) -> MediaResult<Vec<EncodedFrame>> {
    let duration = source.duration_seconds();
    let timestamps = sample_timestamps(duration, frame_count);
    let mut frames = Vec::with_capacity(frame_count);

    for (index, timestamp) in timestamps.iter().copied().enumerate() {
        match source.seek_and_capture(timestamp).await {
            Ok(raw) => match encode_frame(&raw) {
                Ok(frame) => {
                    debug!(index, timestamp, "frame captured");
                    frames.push(frame);
                }
                Err(e) => {
                    warn!(index, timestamp, error = %e, "frame encode failed, skipping");
                }
            },
            Err(e) => {
                warn!(index, timestamp, error = %e, "frame capture failed, skipping");
            }
        }
    }

    if frames.is_empty() {
        return Err(MediaError::EmptyFrameSet);
    }

    debug!(
        collected = frames.len(),
        requested = frame_count,
        "frame sampling complete"
    );
    Ok(frames)
}
