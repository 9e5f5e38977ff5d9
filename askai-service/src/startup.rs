//! Application startup and lifecycle management.
//!
//! The target model is resolved against the provider catalog here, once,
//! before the listener starts serving; resolution failure aborts startup.

use crate::config::AskaiConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiProvider};
use crate::services::providers::{GenerativeProvider, ModelDescriptor};
use crate::services::resolver::{resolve_model, CONTENT_GENERATION_METHOD};
use axum::{routing::get, Router};
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// The resolved model is picked at startup and held immutably for the
/// process lifetime; `model` is `None` only in states built before
/// resolution.
#[derive(Clone)]
pub struct AppState {
    pub config: AskaiConfig,
    pub provider: Arc<dyn GenerativeProvider>,
    pub model: Option<Arc<ModelDescriptor>>,
}

/// Build the HTTP router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/favicon.ico", get(handlers::favicon))
        .route("/list-models", get(handlers::list_models))
        .route("/ask-ai", get(handlers::ask_ai))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application against the live Gemini API.
    pub async fn build(config: AskaiConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn GenerativeProvider> = Arc::new(GeminiProvider::new(GeminiConfig {
            api_key: config.google.api_key.clone(),
        }));

        Self::with_provider(config, provider).await
    }

    /// Build the application with an injected provider.
    pub async fn with_provider(
        config: AskaiConfig,
        provider: Arc<dyn GenerativeProvider>,
    ) -> Result<Self, AppError> {
        let catalog = provider.list_models().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list models during startup");
            AppError::ConfigError(anyhow::anyhow!("Failed to list models: {}", e))
        })?;

        let resolved = resolve_model(
            &config.models.target_model,
            &catalog,
            CONTENT_GENERATION_METHOD,
        )
        .map_err(|e| {
            tracing::error!(
                target = %config.models.target_model,
                error = %e,
                "Failed to resolve target model"
            );
            AppError::ConfigError(anyhow::anyhow!("{}", e))
        })?
        .clone();

        tracing::info!(model = %resolved.name, "Successfully initialized generative model");

        let state = AppState {
            config: config.clone(),
            provider,
            model: Some(Arc::new(resolved)),
        };

        // Port 0 picks a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
