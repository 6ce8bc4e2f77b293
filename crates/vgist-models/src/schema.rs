//! Structured-output schema for the analysis response.
//!
//! The schema is declared statically and shared by the request builder
//! (which sends it to the generation service verbatim) and the response
//! parser (which validates the returned JSON against it), keeping both in
//! lockstep.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Primitive type of a schema field, in the generation service's notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    String,
    Array,
}

impl FieldType {
    /// Check whether a JSON value matches this field type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Array => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// A single field of the response schema.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaField {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ArrayItems>,
    pub description: &'static str,
}

/// Element type of an array field.
#[derive(Debug, Clone, Serialize)]
pub struct ArrayItems {
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl SchemaField {
    fn string(description: &'static str) -> Self {
        Self {
            field_type: FieldType::String,
            items: None,
            description,
        }
    }

    fn string_array(description: &'static str) -> Self {
        Self {
            field_type: FieldType::Array,
            items: Some(ArrayItems {
                field_type: FieldType::String,
            }),
            description,
        }
    }
}

/// Object schema describing the required analysis response.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    pub properties: BTreeMap<&'static str, SchemaField>,
    pub required: Vec<&'static str>,
}

impl ResponseSchema {
    /// Field names that must be present in a valid response.
    pub fn required_fields(&self) -> &[&'static str] {
        &self.required
    }

    /// Look up the declared type of a field.
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.properties.get(name)
    }
}

/// The four-field analysis response schema.
pub fn analysis_response_schema() -> ResponseSchema {
    let mut properties = BTreeMap::new();
    properties.insert(
        "transcricaoVisual",
        SchemaField::string(
            "Descrição detalhada em parágrafos do que está acontecendo cena por cena. \
             Se houver texto visível, transcreva-o. Se houver pessoas, descreva suas \
             ações e o ambiente.",
        ),
    );
    properties.insert(
        "assuntoPrincipal",
        SchemaField::string("O tema central ou o propósito principal do vídeo em uma única frase."),
    );
    properties.insert(
        "resumo",
        SchemaField::string("Um resumo conciso de 2-3 frases do conteúdo geral do vídeo."),
    );
    properties.insert(
        "topicosChave",
        SchemaField::string_array(
            "Uma lista em marcadores (bullet points) dos principais tópicos, conceitos \
             ou ações mostrados no vídeo.",
        ),
    );

    ResponseSchema {
        schema_type: "OBJECT",
        properties,
        required: vec![
            "transcricaoVisual",
            "assuntoPrincipal",
            "resumo",
            "topicosChave",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_declares_four_required_fields() {
        let schema = analysis_response_schema();
        assert_eq!(schema.required_fields().len(), 4);
        for name in schema.required_fields() {
            assert!(schema.field(name).is_some(), "missing property for {name}");
        }
    }

    #[test]
    fn schema_serializes_to_service_notation() {
        let schema = analysis_response_schema();
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value["type"], "OBJECT");
        assert_eq!(value["properties"]["resumo"]["type"], "STRING");
        assert_eq!(value["properties"]["topicosChave"]["type"], "ARRAY");
        assert_eq!(value["properties"]["topicosChave"]["items"]["type"], "STRING");
        assert!(value["properties"]["resumo"]["items"].is_null());
    }

    #[test]
    fn field_type_matching() {
        assert!(FieldType::String.matches(&Value::String("x".into())));
        assert!(!FieldType::String.matches(&serde_json::json!(["x"])));
        assert!(FieldType::Array.matches(&serde_json::json!(["a", "b"])));
        assert!(!FieldType::Array.matches(&serde_json::json!([1, 2])));
        assert!(!FieldType::Array.matches(&Value::String("x".into())));
    }
}
