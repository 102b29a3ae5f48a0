//! # Application Configuration
//!
//! Configuration for the `askql-server`, loaded from an optional `config.yml`
//! overlaid with environment variables (e.g. `PROVIDER__API_KEY`). The
//! generation model identifier and access token are environment-provided;
//! nothing secret lives in the file.

use askql::providers::translate::DEFAULT_TRANSLATE_API_URL;
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

/// The root configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite database file (":memory:" for in-memory).
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// How many linked columns the schema linker keeps per question.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Whether to reset and seed the mock dataset at startup.
    #[serde(default = "default_seed_mock_data")]
    pub seed_mock_data: bool,
    /// The generation provider configuration.
    pub provider: ProviderConfig,
    /// The embedding model configuration used for schema linking.
    pub embedding: EmbeddingConfig,
    /// The translation service configuration for input normalization.
    #[serde(default)]
    pub translation: TranslationConfig,
}

fn default_port() -> u16 {
    9090
}

fn default_db_url() -> String {
    "db/askql.db".to_string()
}

fn default_top_k() -> usize {
    10
}

fn default_seed_mock_data() -> bool {
    true
}

/// Configuration for a generation provider instance.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider ("gemini" or "local").
    pub provider: String,
    /// The API URL. Optional for Gemini, where it can be derived from the model.
    pub api_url: Option<String>,
    /// The access token; can be null for unauthenticated local providers.
    pub api_key: Option<String>,
    pub model_name: String,
}

/// Configuration for the embedding model provider.
#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    pub api_url: String,
    pub model_name: String,
    pub api_key: Option<String>,
}

/// Configuration for the translation capability.
#[derive(Debug, Deserialize, Clone)]
pub struct TranslationConfig {
    #[serde(default = "default_translation_enabled")]
    pub enabled: bool,
    #[serde(default = "default_translation_api_url")]
    pub api_url: String,
}

fn default_translation_enabled() -> bool {
    true
}

fn default_translation_api_url() -> String {
    DEFAULT_TRANSLATE_API_URL.to_string()
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: default_translation_enabled(),
            api_url: default_translation_api_url(),
        }
    }
}

/// Loads the configuration from `config.yml` (if present) and the environment.
pub fn get_config() -> anyhow::Result<AppConfig> {
    let settings = ConfigBuilder::builder()
        .add_source(File::new("config.yml", FileFormat::Yaml).required(false))
        .add_source(Environment::default().separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
