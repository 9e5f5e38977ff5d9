use crate::startup::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use service_core::error::AppError;

/// Public view of a provider model.
#[derive(Debug, Serialize)]
pub struct ModelView {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ListModelsResponse {
    pub models: Vec<ModelView>,
}

/// List the models available to the configured credential.
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<ListModelsResponse>, AppError> {
    let catalog = state.provider.list_models().await.map_err(|e| {
        tracing::error!(error = %e, "Error listing models");
        AppError::InternalError(anyhow::anyhow!("Error listing models: {}", e))
    })?;

    let models = catalog
        .into_iter()
        .map(|model| ModelView {
            name: model.name,
            display_name: model.display_name,
            description: model.description,
            supported_generation_methods: model.supported_generation_methods,
        })
        .collect();

    Ok(Json(ListModelsResponse { models }))
}
