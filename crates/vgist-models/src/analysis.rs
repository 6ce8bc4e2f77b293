//! Typed analysis record returned by the generation service.

use serde::{Deserialize, Serialize};

/// The structured result of a video analysis.
///
/// All four fields are mandatory in the schema contract; a response missing
/// any of them is a parse failure, never a partially-filled record. Field
/// names on the wire match the Portuguese schema verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Central theme of the video, one sentence
    #[serde(rename = "assuntoPrincipal")]
    pub assunto_principal: String,

    /// Concise 2-3 sentence summary of the overall content
    pub resumo: String,

    /// Scene-by-scene visual description, including visible on-screen text
    #[serde(rename = "transcricaoVisual")]
    pub transcricao_visual: String,

    /// Bullet-style list of key topics, concepts or actions shown
    #[serde(rename = "topicosChave")]
    pub topicos_chave: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names_are_portuguese_camel_case() {
        let result = AnalysisResult {
            assunto_principal: "Tutorial de culinária".to_string(),
            resumo: "Um chef prepara um prato.".to_string(),
            transcricao_visual: "Cena 1: cozinha.".to_string(),
            topicos_chave: vec!["culinária".to_string()],
        };

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("assuntoPrincipal").is_some());
        assert!(value.get("resumo").is_some());
        assert!(value.get("transcricaoVisual").is_some());
        assert!(value.get("topicosChave").is_some());
    }

    #[test]
    fn missing_field_fails_deserialization() {
        let json = r#"{"assuntoPrincipal":"a","resumo":"b","transcricaoVisual":"c"}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn topic_order_is_preserved() {
        let json = r#"{
            "assuntoPrincipal": "a",
            "resumo": "b",
            "transcricaoVisual": "c",
            "topicosChave": ["primeiro", "segundo", "terceiro"]
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.topicos_chave, vec!["primeiro", "segundo", "terceiro"]);
    }
}
