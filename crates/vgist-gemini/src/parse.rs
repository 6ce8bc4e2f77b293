//! Response validation and decoding.

use serde_json::Value;
use tracing::warn;
use vgist_models::{analysis_response_schema, AnalysisResult};

use crate::error::{GeminiError, GeminiResult};

/// Decode the raw response text into a typed analysis record.
///
/// The text is trimmed, stripped of markdown code fences (the service emits
/// them even with a JSON response MIME type), parsed, and validated against
/// the same schema the request declared. Any failure is a
/// `MalformedResponse` carrying the offending text, distinct from transport
/// and auth errors.
pub fn parse_analysis(raw: &str) -> GeminiResult<AnalysisResult> {
    let text = strip_code_fences(raw.trim());

    let value: Value = serde_json::from_str(text).map_err(|e| {
        warn!(error = %e, "analysis response is not valid JSON");
        GeminiError::malformed(format!("invalid JSON: {e}"), raw)
    })?;

    let object = value
        .as_object()
        .ok_or_else(|| GeminiError::malformed("response is not a JSON object", raw))?;

    let schema = analysis_response_schema();
    for name in schema.required_fields() {
        let Some(field_value) = object.get(*name) else {
            return Err(GeminiError::malformed(
                format!("missing required field '{name}'"),
                raw,
            ));
        };
        if let Some(field) = schema.field(name) {
            if !field.field_type.matches(field_value) {
                return Err(GeminiError::malformed(
                    format!("field '{name}' has the wrong type"),
                    raw,
                ));
            }
        }
    }

    serde_json::from_value(value)
        .map_err(|e| GeminiError::malformed(format!("failed to decode record: {e}"), raw))
}

/// Strip a leading ```json / ``` fence and a trailing ``` fence.
fn strip_code_fences(text: &str) -> &str {
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "assuntoPrincipal": "Tutorial de culinária italiana",
        "resumo": "Um chef prepara massa fresca. O vídeo mostra cada etapa.",
        "transcricaoVisual": "Cena 1: uma cozinha profissional. Texto na tela: 'Passo 1'.",
        "topicosChave": ["massa fresca", "molho", "finalização"]
    }"#;

    #[test]
    fn well_formed_response_round_trips_verbatim() {
        let result = parse_analysis(WELL_FORMED).unwrap();
        assert_eq!(result.assunto_principal, "Tutorial de culinária italiana");
        assert_eq!(
            result.topicos_chave,
            vec!["massa fresca", "molho", "finalização"]
        );
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let padded = format!("\n\n  {WELL_FORMED}  \n");
        assert!(parse_analysis(&padded).is_ok());
    }

    #[test]
    fn markdown_fenced_json_is_accepted() {
        let fenced = format!("```json\n{WELL_FORMED}\n```");
        assert!(parse_analysis(&fenced).is_ok());
        let fenced_plain = format!("```\n{WELL_FORMED}\n```");
        assert!(parse_analysis(&fenced_plain).is_ok());
    }

    #[test]
    fn missing_field_is_malformed_never_partial() {
        let json = r#"{
            "assuntoPrincipal": "a",
            "resumo": "b",
            "topicosChave": ["c"]
        }"#;
        let err = parse_analysis(json).unwrap_err();
        match err {
            GeminiError::MalformedResponse { reason, raw } => {
                assert!(reason.contains("transcricaoVisual"));
                assert!(raw.contains("assuntoPrincipal"));
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let json = r#"{
            "assuntoPrincipal": "a",
            "resumo": "b",
            "transcricaoVisual": "c",
            "topicosChave": "not an array"
        }"#;
        assert!(matches!(
            parse_analysis(json),
            Err(GeminiError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn non_json_text_is_malformed() {
        assert!(matches!(
            parse_analysis("I could not analyze the video."),
            Err(GeminiError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn non_object_json_is_malformed() {
        assert!(matches!(
            parse_analysis("[1, 2, 3]"),
            Err(GeminiError::MalformedResponse { .. })
        ));
    }
}
