//! Gemini AI provider implementation.
//!
//! Calls Google's Generative Language API over REST: the model catalog via
//! `GET /models`, content generation via `POST /models/{model}:generateContent`.

use super::{
    Candidate, CandidateContent, CandidatePart, GenerationRequest, GenerativeProvider,
    ModelDescriptor, ProviderError,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
}

/// Gemini generative provider.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Build the generateContent URL for the given model.
    fn generate_url(&self, model: &str) -> String {
        // catalog names already carry the models/ namespace
        let bare = model.strip_prefix("models/").unwrap_or(model);
        format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, bare, self.config.api_key
        )
    }

    /// Classify a non-success HTTP status from the API.
    async fn api_error(response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            return ProviderError::RateLimited;
        }

        ProviderError::ApiError(format!("Gemini API error {}: {}", status, error_text))
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
        let url = format!("{}/models?key={}", GEMINI_API_BASE, self.config.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let api_response: ListModelsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        Ok(api_response
            .models
            .into_iter()
            .map(ModelDescriptor::from)
            .collect())
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![ApiPart {
                    text: Some(request.query.clone()),
                }],
            }],
            generation_config: Some(GenerationConfig {
                candidate_count: Some(request.candidate_count),
            }),
        };

        let url = self.generate_url(model);

        tracing::debug!(
            model = %model,
            query_len = request.query.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        Ok(api_response
            .candidates
            .into_iter()
            .map(Candidate::from)
            .collect())
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        // Listing models verifies the API key works
        let url = format!("{}/models?key={}", GEMINI_API_BASE, self.config.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ApiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    candidate_count: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ApiModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiModel {
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

impl From<ApiModel> for ModelDescriptor {
    fn from(model: ApiModel) -> Self {
        ModelDescriptor {
            name: model.name,
            display_name: model.display_name,
            description: model.description,
            supported_generation_methods: model.supported_generation_methods,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCandidate {
    #[serde(default)]
    content: Option<ApiContent>,
    /// Older models return the candidate text directly.
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiContent {
    #[serde(default)]
    parts: Vec<ApiPart>,
}

impl From<ApiCandidate> for Candidate {
    fn from(candidate: ApiCandidate) -> Self {
        Candidate {
            content: candidate.content.map(|content| CandidateContent {
                parts: content
                    .parts
                    .into_iter()
                    .map(|part| CandidatePart { text: part.text })
                    .collect(),
            }),
            text: candidate.text,
            finish_reason: candidate.finish_reason.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_url_strips_model_namespace() {
        let provider = GeminiProvider::new(GeminiConfig {
            api_key: "key".to_string(),
        });

        let url = provider.generate_url("models/chat-bison-001");
        assert_eq!(
            url,
            format!(
                "{}/models/chat-bison-001:generateContent?key=key",
                GEMINI_API_BASE
            )
        );
        assert_eq!(url, provider.generate_url("chat-bison-001"));
    }

    #[test]
    fn candidate_mapping_defaults_missing_fields() {
        let api: ApiCandidate = serde_json::from_str(r#"{"finishReason":"SAFETY"}"#).unwrap();
        let candidate = Candidate::from(api);

        assert!(candidate.content.is_none());
        assert!(candidate.text.is_none());
        assert_eq!(candidate.finish_reason, "SAFETY");
    }

    #[test]
    fn response_parsing_handles_structured_parts() {
        let raw = r#"{
            "candidates": [
                {
                    "content": {"parts": [{"text": "Hello"}, {"text": " there"}], "role": "model"},
                    "finishReason": "STOP"
                }
            ]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let candidate = Candidate::from(response.candidates.into_iter().next().unwrap());

        let parts = candidate.content.unwrap().parts;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text.as_deref(), Some("Hello"));
        assert_eq!(candidate.finish_reason, "STOP");
    }
}
