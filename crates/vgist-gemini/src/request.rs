//! Multimodal analysis request assembly.

use serde::Serialize;
use vgist_models::{analysis_response_schema, EncodedFrame, ResponseSchema};

use crate::error::{GeminiError, GeminiResult};

/// Fixed instruction sent ahead of the frames.
pub const ANALYSIS_PROMPT: &str = "Analise os seguintes frames de um vídeo. Com base nessas \
     imagens, extraia as informações solicitadas. Sua resposta DEVE ser um objeto JSON \
     bem-formado que corresponda ao esquema fornecido.";

/// Gemini generateContent request.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// One content part: instruction text or an inline image.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

#[derive(Debug, Serialize)]
pub struct Blob {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
    #[serde(rename = "responseSchema")]
    pub response_schema: ResponseSchema,
}

/// Assemble the multimodal request: one instruction text part followed by the
/// frames in capture order, plus the structured-output schema.
///
/// Pure function; fails only on an empty frame sequence, which the sampler
/// guarantees never to produce.
pub fn build_request(frames: &[EncodedFrame]) -> GeminiResult<GenerateContentRequest> {
    if frames.is_empty() {
        return Err(GeminiError::NoFrames);
    }

    let mut parts = Vec::with_capacity(frames.len() + 1);
    parts.push(Part::Text {
        text: ANALYSIS_PROMPT.to_string(),
    });
    parts.extend(frames.iter().map(|frame| Part::InlineData {
        inline_data: Blob {
            mime_type: frame.mime_type.clone(),
            data: frame.data.clone(),
        },
    }));

    Ok(GenerateContentRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: analysis_response_schema(),
        },
    })
}
