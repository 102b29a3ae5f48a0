//! # Application State
//!
//! The shared application state and the logic for building it at startup.
//! All process-wide capabilities (generation provider, embedder, translator,
//! storage) are constructed exactly once here; a misconfigured provider fails
//! startup rather than the first request.

use crate::config::AppConfig;
use askql::providers::{
    ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider, HttpEmbedder},
    db::sqlite::SqliteProvider,
    translate::GoogleTranslator,
};
use askql::{AskClient, AskClientBuilder};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The pipeline client answering questions.
    pub client: Arc<AskClient>,
    /// The storage provider, also used directly by the schema endpoint.
    pub sqlite_provider: Arc<SqliteProvider>,
}

/// Builds the shared application state from the configuration.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let ai_provider: Box<dyn AiProvider> = match config.provider.provider.as_str() {
        "gemini" => {
            let api_key = config
                .provider
                .api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("api_key is required for the gemini provider"))?;
            // If api_url is not provided, construct it from the model name.
            let api_url = config.provider.api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    config.provider.model_name
                )
            });
            Box::new(GeminiProvider::new(api_url, api_key)?)
        }
        "local" => {
            let api_url = config.provider.api_url.clone().ok_or_else(|| {
                anyhow::anyhow!("api_url is required for the local provider")
            })?;
            Box::new(LocalAiProvider::new(
                api_url,
                config.provider.api_key.clone(),
                Some(config.provider.model_name.clone()),
            )?)
        }
        other => {
            return Err(anyhow::anyhow!("Unsupported AI provider: {other}"));
        }
    };

    let sqlite_provider = SqliteProvider::new(&config.db_url).await?;
    info!(db_path = %config.db_url, "Initialized local storage provider (SQLite).");
    sqlite_provider.initialize_schema().await?;
    if config.seed_mock_data {
        sqlite_provider.seed_mock_data().await?;
    }

    let embedder = HttpEmbedder::new(
        config.embedding.api_url.clone(),
        config.embedding.model_name.clone(),
        config.embedding.api_key.clone(),
    );

    let mut builder = AskClientBuilder::new()
        .ai_provider(ai_provider)
        .storage(Box::new(sqlite_provider.clone()))
        .embedder(Box::new(embedder))
        .top_k(config.top_k);

    if config.translation.enabled {
        builder = builder.translator(Box::new(GoogleTranslator::new(
            config.translation.api_url.clone(),
        )?));
    }

    let client = builder.build()?;

    Ok(AppState {
        config: Arc::new(config),
        client: Arc::new(client),
        sqlite_provider: Arc::new(sqlite_provider),
    })
}
