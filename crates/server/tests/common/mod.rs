#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Spawns the server on a random port with its generation and embedding
//! endpoints pointed at a mock HTTP server.

use askql_server::config::{
    AppConfig, EmbeddingConfig, ProviderConfig, TranslationConfig,
};
use askql_server::run;
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};

/// Builds a test configuration against mocked AI endpoints, with an isolated
/// in-memory database and translation disabled (test questions are English).
pub fn test_config(ai_api_url: String, embeddings_api_url: String) -> AppConfig {
    AppConfig {
        port: 0,
        db_url: ":memory:".to_string(),
        top_k: 10,
        seed_mock_data: true,
        provider: ProviderConfig {
            provider: "local".to_string(),
            api_url: Some(ai_api_url),
            api_key: None,
            model_name: "test-model".to_string(),
        },
        embedding: EmbeddingConfig {
            api_url: embeddings_api_url,
            model_name: "test-embedding-model".to_string(),
            api_key: None,
        },
        translation: TranslationConfig {
            enabled: false,
            ..Default::default()
        },
    }
}

/// Spawns the app on a random port and returns its base address.
pub async fn spawn_app(config: AppConfig) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{port}");

    tokio::spawn(async move {
        if let Err(e) = run(listener, config).await {
            eprintln!("Server error: {e}");
        }
    });

    // Give the server a moment to start.
    sleep(Duration::from_millis(100)).await;

    address
}
