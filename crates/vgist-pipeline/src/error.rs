//! Unified error taxonomy for one analysis invocation.
//!
//! Upstream crate errors are flattened into one kind set so the presentation
//! layer can map each kind to a user-visible treatment without inspecting
//! nested sources.

use thiserror::Error;
use vgist_gemini::GeminiError;
use vgist_media::MediaError;

/// Result type for the analysis pipeline.
pub type AnalyzeResult<T> = Result<T, AnalyzeError>;

/// Everything that can end an analysis invocation.
///
/// No variant is fatal to the process; every failure leaves the system ready
/// for a new attempt.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot load media: {0}")]
    CorruptMedia(String),

    #[error("Unsupported media: {0}")]
    UnsupportedMedia(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Could not extract any frames from the video")]
    EmptyFrameSet,

    #[error("API key is not configured")]
    MissingCredential,

    #[error("Authentication rejected: {0}")]
    Authentication(String),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Response was not in the expected format: {reason}")]
    MalformedResponse { reason: String, raw: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalyzeError {
    /// Human-readable text for the presentation layer.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(_) => {
                "No video selected, or the selected file is not a video.".to_string()
            }
            Self::CorruptMedia(_) | Self::UnsupportedMedia(_) | Self::InvalidDuration(_) => {
                "Cannot process this video. It might be corrupt, unsupported, or a live stream."
                    .to_string()
            }
            Self::EmptyFrameSet => "Could not extract any frames from the video.".to_string(),
            Self::MissingCredential => {
                "API key is not configured. Please set the GEMINI_API_KEY environment variable."
                    .to_string()
            }
            Self::Authentication(reason) | Self::Transport(reason) => {
                format!("Analysis failed: {reason}")
            }
            Self::Service { message, .. } => format!("Analysis failed: {message}"),
            Self::MalformedResponse { .. } => {
                "The AI response was not in the expected JSON format. Please try again."
                    .to_string()
            }
            Self::Internal(reason) => format!("Analysis failed: {reason}"),
        }
    }

    /// Whether retrying the whole pipeline may succeed without any
    /// configuration or input change.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Authentication(_)
                | Self::Transport(_)
                | Self::Service { .. }
                | Self::MalformedResponse { .. }
        )
    }
}

impl From<MediaError> for AnalyzeError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::InvalidInput(msg) => Self::InvalidInput(msg),
            MediaError::FileNotFound(path) => {
                Self::InvalidInput(format!("file not found: {}", path.display()))
            }
            MediaError::CorruptMedia { message, .. } => Self::CorruptMedia(message),
            MediaError::UnsupportedMedia(msg) => Self::UnsupportedMedia(msg),
            MediaError::InvalidDuration(msg) => Self::InvalidDuration(msg),
            MediaError::EmptyFrameSet => Self::EmptyFrameSet,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<GeminiError> for AnalyzeError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingCredential => Self::MissingCredential,
            GeminiError::Authentication(msg) => Self::Authentication(msg),
            GeminiError::Transport(e) => Self::Transport(e.to_string()),
            GeminiError::Service { status, message } => Self::Service { status, message },
            GeminiError::MalformedResponse { reason, raw } => {
                Self::MalformedResponse { reason, raw }
            }
            // The sampler's non-empty invariant makes this unreachable from
            // the pipeline entry point
            GeminiError::NoFrames => Self::EmptyFrameSet,
        }
    }
}
