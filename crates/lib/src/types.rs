use crate::errors::AskError;
use crate::providers::{
    ai::{AiProvider, Embedder},
    db::storage::Storage,
    translate::Translator,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The number of linked columns sent to the generation model when the caller
/// does not override it.
pub const DEFAULT_TOP_K: usize = 10;

/// The coarse column type used in schema descriptions and prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
    String,
    Bytes,
    Date,
    Timestamp,
}

/// A single column of a table, as reported by storage introspection.
#[derive(Debug, Clone)]
pub struct TableField {
    pub name: String,
    pub r#type: FieldType,
}

/// The introspected shape of one table.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub fields: Vec<TableField>,
}

/// Ordered column names plus rows, each row a JSON object keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Value>,
}

/// The result of attempting to run a generated statement.
///
/// Serializes to either `{columns, data, sql}` or `{error, sql}`. The SQL that
/// was (or would have been) executed is always echoed for debuggability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    Rows {
        columns: Vec<String>,
        data: Vec<Value>,
        sql: String,
    },
    Failure {
        error: String,
        sql: String,
    },
}

impl QueryOutcome {
    pub fn rows(columns: Vec<String>, data: Vec<Value>, sql: impl Into<String>) -> Self {
        Self::Rows {
            columns,
            data,
            sql: sql.into(),
        }
    }

    pub fn failure(error: impl Into<String>, sql: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
            sql: sql.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// The error message, if this outcome is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error, .. } => Some(error),
            Self::Rows { .. } => None,
        }
    }

    /// The SQL echoed with this outcome.
    pub fn sql(&self) -> &str {
        match self {
            Self::Rows { sql, .. } | Self::Failure { sql, .. } => sql,
        }
    }

    /// The result rows, if this outcome succeeded.
    pub fn data(&self) -> Option<&[Value]> {
        match self {
            Self::Rows { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }
}

/// A client that turns natural language questions into executed read-only queries.
///
/// All capabilities are constructed once and shared; the client itself is cheap
/// to clone and safe to use from concurrent requests.
#[derive(Clone)]
pub struct AskClient {
    pub ai_provider: Box<dyn AiProvider>,
    pub storage: Box<dyn Storage>,
    pub embedder: Box<dyn Embedder>,
    pub translator: Option<Box<dyn Translator>>,
    pub top_k: usize,
}

impl fmt::Debug for AskClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AskClient")
            .field("storage", &self.storage.name())
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

/// A builder for creating `AskClient` instances.
#[derive(Default)]
pub struct AskClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    storage: Option<Box<dyn Storage>>,
    embedder: Option<Box<dyn Embedder>>,
    translator: Option<Box<dyn Translator>>,
    top_k: Option<usize>,
}

impl AskClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the generation provider.
    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    /// Sets the storage provider the generated statements run against.
    pub fn storage(mut self, storage: Box<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Sets the embedding provider used for schema linking.
    pub fn embedder(mut self, embedder: Box<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Sets the translator used for input normalization. Without one,
    /// questions pass through untranslated.
    pub fn translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Overrides the number of linked columns (default 10).
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Builds the `AskClient`, failing if a required capability is missing.
    pub fn build(self) -> Result<AskClient, AskError> {
        Ok(AskClient {
            ai_provider: self.ai_provider.ok_or(AskError::MissingAiProvider)?,
            storage: self.storage.ok_or(AskError::MissingStorageProvider)?,
            embedder: self.embedder.ok_or(AskError::MissingEmbedder)?,
            translator: self.translator,
            top_k: self.top_k.unwrap_or(DEFAULT_TOP_K),
        })
    }
}
