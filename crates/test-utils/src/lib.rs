//! # Shared Test Utilities
//!
//! Mock capabilities and database fixtures for the `askql` test suites, so
//! tests stay isolated and repeatable.

use anyhow::Result;
use askql::errors::AskError;
use askql::providers::ai::{AiProvider, Embedder};
use askql::providers::db::sqlite::SqliteProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

// --- Test Setup ---

/// A helper that creates an isolated, seeded in-memory database per test.
pub struct TestSetup {
    pub provider: SqliteProvider,
}

impl TestSetup {
    /// Creates a new in-memory database with the application schema and the
    /// deterministic mock dataset.
    pub async fn new() -> Result<Self> {
        let provider = SqliteProvider::new(":memory:").await?;
        provider.initialize_schema().await?;
        provider.seed_mock_data().await?;
        Ok(Self { provider })
    }
}

// --- Mock AI Provider ---

/// A generation provider that replays pre-programmed responses in order and
/// records every call for assertion.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<(String, String)>>>,
    pub responses: Arc<RwLock<Vec<String>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, AskError> {
        self.call_history
            .write()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        if let Some(response) = self.responses.write().unwrap().pop() {
            Ok(response)
        } else {
            Ok("Default mock response".to_string())
        }
    }
}

/// A generation provider that always fails with a transport-style error.
#[derive(Clone, Debug)]
pub struct ErroringAiProvider;

#[async_trait]
impl AiProvider for ErroringAiProvider {
    async fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, AskError> {
        Err(AskError::AiApi("mock provider is down".to_string()))
    }
}

// --- Mock Embedder ---

/// An embedder returning pre-programmed vectors per input, with a shared
/// default for everything else (so unprogrammed inputs tie).
#[derive(Clone, Debug)]
pub struct MockEmbedder {
    vectors: Arc<RwLock<HashMap<String, Vec<f32>>>>,
    default: Vec<f32>,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self {
            vectors: Arc::new(RwLock::new(HashMap::new())),
            default: vec![1.0, 0.0, 0.0],
        }
    }

    /// Pre-programs the vector returned for an exact input string.
    pub fn program(&self, input: &str, vector: Vec<f32>) {
        self.vectors
            .write()
            .unwrap()
            .insert(input.to_string(), vector);
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, input: &str) -> Result<Vec<f32>, AskError> {
        Ok(self
            .vectors
            .read()
            .unwrap()
            .get(input)
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }
}
