pub mod embedding;
pub mod gemini;
pub mod local;

use crate::errors::AskError;
use async_trait::async_trait;
use dyn_clone::DynClone;
pub use embedding::{generate_embedding, HttpEmbedder};
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This trait defines a common interface for generating SQL from natural
/// language using different Large Language Models (e.g., Gemini, local models).
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// The result should be a string containing the AI's raw response; it is
    /// never trusted and always passes through the sanitizer.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, AskError>;
}

dyn_clone::clone_trait_object!(AiProvider);

/// A trait for turning text into a fixed-size numeric vector.
///
/// Used by the schema linker to rank column references against a question.
#[async_trait]
pub trait Embedder: Send + Sync + Debug + DynClone {
    async fn embed(&self, input: &str) -> Result<Vec<f32>, AskError>;
}

dyn_clone::clone_trait_object!(Embedder);
