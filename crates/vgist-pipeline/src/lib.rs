//! Video frame-sampling analysis pipeline.
//!
//! One inbound surface: [`analyze`] takes a media source, samples evenly
//! spaced frames through the FFmpeg decoder adapter, sends them to the
//! generation service with a structured-output schema, and returns the typed
//! [`AnalysisResult`] or one of the [`AnalyzeError`] kinds.

pub mod analyze;
pub mod error;

pub use analyze::{analyze, AnalyzeOptions};
pub use error::{AnalyzeError, AnalyzeResult};

// Re-exports so callers need only this crate
pub use vgist_gemini::GeminiClient;
pub use vgist_media::MediaSource;
pub use vgist_models::AnalysisResult;
