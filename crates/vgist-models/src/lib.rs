//! Shared data models for the VidGist analysis pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Encoded still frames sampled from a video
//! - The typed analysis record returned by the generation service
//! - The structured-output schema shared by request builder and parser

pub mod analysis;
pub mod frame;
pub mod schema;

// Re-export common types
pub use analysis::AnalysisResult;
pub use frame::{EncodedFrame, FRAME_MIME_TYPE, JPEG_QUALITY};
pub use schema::{analysis_response_schema, FieldType, ResponseSchema, SchemaField};

/// Default number of frames sampled per video.
pub const DEFAULT_FRAME_COUNT: usize = 16;
