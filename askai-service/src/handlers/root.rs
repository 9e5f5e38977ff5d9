use crate::startup::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Welcome payload naming the configured target model.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": format!("Welcome! Using AI model: {}", state.config.models.target_model)
    }))
}

/// Browsers request this unconditionally; there is no icon to serve.
pub async fn favicon() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
