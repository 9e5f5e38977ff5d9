use crate::services::normalizer::normalize_candidates;
use crate::services::providers::GenerationRequest;
use crate::startup::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

#[derive(Debug, Deserialize)]
pub struct AskParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub query: String,
    pub answers: Vec<String>,
}

/// Forward a query to the resolved model and return the normalized answers.
pub async fn ask_ai(
    State(state): State<AppState>,
    Query(params): Query<AskParams>,
) -> Result<Json<AskResponse>, AppError> {
    // checked before q: an unresolved model reports 503 even without a query
    let model = state.model.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Generative AI Model not initialized.".to_string())
    })?;

    let query = params.q.unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Query parameter 'q' is required"
        )));
    }

    let request = GenerationRequest {
        query: query.clone(),
        candidate_count: state.config.models.candidate_count,
    };

    let candidates = state
        .provider
        .generate(&model.name, &request)
        .await
        .map_err(|e| {
            tracing::error!(model = %model.name, error = %e, "Error during AI interaction");
            AppError::InternalError(anyhow::anyhow!("Error during AI interaction: {}", e))
        })?;

    let answers = normalize_candidates(&candidates).map_err(|e| {
        tracing::error!(
            model = %model.name,
            candidate_count = candidates.len(),
            "No text answers extracted from response"
        );
        AppError::InternalError(anyhow::anyhow!("{}", e))
    })?;

    Ok(Json(AskResponse { query, answers }))
}
