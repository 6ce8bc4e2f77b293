//! Error types for the generation service exchange.

use thiserror::Error;

/// Result type for generation service operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Errors that can occur while building, sending, or decoding an analysis
/// request.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("API key is not configured")]
    MissingCredential,

    #[error("Cannot build a request with zero frames")]
    NoFrames,

    #[error("Authentication rejected by the generation service: {0}")]
    Authentication(String),

    #[error("Request to the generation service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Generation service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Response was not in the expected format: {reason}")]
    MalformedResponse {
        reason: String,
        /// The offending raw text, retained for diagnostic logging
        raw: String,
    },
}

impl GeminiError {
    /// Create a malformed-response error.
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }
}
