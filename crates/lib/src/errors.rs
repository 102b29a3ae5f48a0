use thiserror::Error;

/// Custom error types for the query translation pipeline.
#[derive(Error, Debug)]
pub enum AskError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Request to AI provider failed: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("Translation failed: {0}")]
    Translation(String),
    #[error("Storage provider connection error: {0}")]
    StorageConnection(String),
    #[error("Storage operation failed: {0}")]
    StorageOperationFailed(String),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
    #[error("An AI provider is required")]
    MissingAiProvider,
    #[error("A storage provider is required")]
    MissingStorageProvider,
    #[error("An embedding provider is required")]
    MissingEmbedder,
}
