//! FFmpeg CLI wrapper for frame sampling.
//!
//! This crate provides:
//! - A decoder adapter over `ffmpeg`/`ffprobe` with seek-and-capture
//! - JPEG + base64 frame encoding
//! - Evenly spaced, fault-tolerant frame sampling

pub mod decoder;
pub mod encode;
pub mod error;
pub mod probe;
pub mod sampler;

pub use decoder::{MediaSource, RawFrame, VideoHandle};
pub use encode::encode_frame;
pub use error::{MediaError, MediaResult};
pub use probe::{probe_video, VideoMetadata};
pub use sampler::{sample_frames, sample_timestamps, FrameCapture};
