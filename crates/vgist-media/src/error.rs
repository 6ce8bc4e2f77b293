//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while decoding and sampling a video.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Cannot load media: {message}")]
    CorruptMedia {
        message: String,
        stderr: Option<String>,
    },

    #[error("Unsupported media: {0}")]
    UnsupportedMedia(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Frame capture failed at {timestamp:.3}s: {message}")]
    CaptureFailed { timestamp: f64, message: String },

    #[error("Frame encoding failed: {0}")]
    Encoding(String),

    #[error("Could not extract any frames from the video")]
    EmptyFrameSet,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a corrupt media error.
    pub fn corrupt_media(message: impl Into<String>, stderr: Option<String>) -> Self {
        Self::CorruptMedia {
            message: message.into(),
            stderr,
        }
    }

    /// Create a capture failure error.
    pub fn capture_failed(timestamp: f64, message: impl Into<String>) -> Self {
        Self::CaptureFailed {
            timestamp,
            message: message.into(),
        }
    }

    /// Create an encoding failure error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding(message.into())
    }
}
