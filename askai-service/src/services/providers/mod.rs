//! Generative AI provider abstraction and implementations.
//!
//! This module provides a trait-based abstraction for generative AI
//! providers, allowing easy swapping between backends (Gemini, mock).

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// A model exposed by the provider's catalog.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    /// Namespaced identifier (e.g., `models/chat-bison-001`).
    pub name: String,

    /// Human-readable name.
    pub display_name: String,

    /// Catalog description.
    pub description: String,

    /// Generation methods the model supports (e.g., `generateContent`).
    pub supported_generation_methods: Vec<String>,
}

/// Per-request generation parameters.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The user's query text.
    pub query: String,

    /// Number of candidates to request, at least 1.
    pub candidate_count: i32,
}

/// One generated alternative for a single query.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    /// Structured content, when the model returns parts.
    pub content: Option<CandidateContent>,

    /// Flat text field returned by older models instead of parts.
    pub text: Option<String>,

    /// Provider finish reason; `STOP` means completed normally. Empty when
    /// the provider omitted it.
    pub finish_reason: String,
}

/// Structured content of a candidate.
#[derive(Debug, Clone)]
pub struct CandidateContent {
    pub parts: Vec<CandidatePart>,
}

/// An atomic fragment of structured content.
#[derive(Debug, Clone)]
pub struct CandidatePart {
    pub text: Option<String>,
}

/// Trait for generative AI providers (e.g., Gemini).
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// List the models available to the configured credential.
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError>;

    /// Generate candidates for a query against the given model.
    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<Candidate>, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
