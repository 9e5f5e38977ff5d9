//! Mock provider implementation for testing.

use super::{
    Candidate, CandidateContent, CandidatePart, GenerationRequest, GenerativeProvider,
    ModelDescriptor, ProviderError,
};
use async_trait::async_trait;

/// Mock generative provider with a canned catalog and scriptable failures.
pub struct MockProvider {
    models: Vec<ModelDescriptor>,
    candidates: Option<Vec<Candidate>>,
    fail_listing: bool,
    fail_generation: bool,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            models: vec![ModelDescriptor {
                name: "models/chat-bison-001".to_string(),
                display_name: "Chat Bison".to_string(),
                description: "Legacy chat model".to_string(),
                supported_generation_methods: vec!["generateContent".to_string()],
            }],
            candidates: None,
            fail_listing: false,
            fail_generation: false,
        }
    }

    pub fn with_models(mut self, models: Vec<ModelDescriptor>) -> Self {
        self.models = models;
        self
    }

    /// Replace the default echo response with canned candidates.
    pub fn with_candidates(mut self, candidates: Vec<Candidate>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn failing_generation(mut self) -> Self {
        self.fail_generation = true;
        self
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeProvider for MockProvider {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
        if self.fail_listing {
            return Err(ProviderError::ApiError(
                "Mock listing failure".to_string(),
            ));
        }

        Ok(self.models.clone())
    }

    async fn generate(
        &self,
        _model: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<Candidate>, ProviderError> {
        if self.fail_generation {
            return Err(ProviderError::ApiError(
                "Mock generation failure".to_string(),
            ));
        }

        if let Some(candidates) = &self.candidates {
            return Ok(candidates.clone());
        }

        Ok(vec![Candidate {
            content: Some(CandidateContent {
                parts: vec![CandidatePart {
                    text: Some(format!("Mock response for: {}", request.query)),
                }],
            }),
            finish_reason: "STOP".to_string(),
            ..Default::default()
        }])
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.fail_listing {
            Err(ProviderError::NotConfigured(
                "Mock provider not enabled".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
