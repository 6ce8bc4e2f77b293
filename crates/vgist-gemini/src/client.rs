//! HTTP client for the Gemini generateContent API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{GeminiError, GeminiResult};
use crate::request::GenerateContentRequest;

/// Model used for frame analysis.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Defensive request timeout; the contract specifies none, but an unbounded
/// hang would pin the whole invocation.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini generateContent response envelope.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

/// Client for the generation service.
///
/// The credential is an explicit constructor parameter; pipeline code never
/// reads ambient environment state.
pub struct GeminiClient {
    api_key: String,
    http: Client,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> GeminiResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::MissingCredential);
        }

        let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self {
            api_key,
            http,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    ///
    /// This is the composition-edge convenience; absence of the variable is a
    /// configuration error, raised before any frame extraction cost.
    pub fn from_env() -> GeminiResult<Self> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Self::new(key),
            _ => Err(GeminiError::MissingCredential),
        }
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the service base URL (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send one generateContent request and return the raw response text.
    ///
    /// Exactly one outstanding request per invocation; no automatic retry.
    pub async fn generate(&self, request: &GenerateContentRequest) -> GeminiResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        debug!(model = %self.model, "sending generateContent request");
        let response = self.http.post(&url).json(request).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Authentication(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Service {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let envelope: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GeminiError::malformed(format!("invalid envelope: {e}"), body.clone()))?;

        let text = envelope
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| GeminiError::malformed("no content in response", body))?;

        info!(model = %self.model, "generateContent succeeded");
        Ok(text)
    }
}
