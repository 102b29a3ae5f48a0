#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared setup for the `askql` integration tests. The mock providers live in
//! the `askql-test-utils` crate; this module only carries what is specific to
//! this test suite.

use askql::providers::ai::{AiProvider, Embedder};
use askql::providers::db::sqlite::SqliteProvider;
use askql::{AskClient, AskClientBuilder};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once for the whole test binary.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}

/// Builds an `AskClient` over the given providers, without a translator.
pub fn build_client(
    ai_provider: Box<dyn AiProvider>,
    storage: SqliteProvider,
    embedder: Box<dyn Embedder>,
) -> AskClient {
    AskClientBuilder::new()
        .ai_provider(ai_provider)
        .storage(Box::new(storage))
        .embedder(embedder)
        .build()
        .expect("client should build with all providers present")
}
