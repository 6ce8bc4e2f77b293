//! Gemini generateContent client with structured JSON output.
//!
//! This crate provides:
//! - Multimodal request assembly (instruction text + inline JPEG frames)
//! - The HTTP exchange with auth/transport/service failures kept distinct
//! - Validation and decoding of the structured response

pub mod client;
pub mod error;
pub mod parse;
pub mod request;

pub use client::{GeminiClient, DEFAULT_MODEL};
pub use error::{GeminiError, GeminiResult};
pub use parse::parse_analysis;
pub use request::{build_request, GenerateContentRequest, ANALYSIS_PROMPT};
