use crate::errors::AskError;
use crate::types::{RowSet, TableSchema};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a storage backend.
///
/// This trait defines a common interface for executing queries and retrieving
/// schema information from a relational store exposing a cursor-style
/// execute/fetch interface.
#[async_trait]
pub trait Storage: Send + Sync + DynClone + Debug {
    /// Returns the name of the storage provider (e.g., "SQLite").
    fn name(&self) -> &str;

    /// Whether text equality on this backend is case-sensitive by default,
    /// requiring the sanitizer's `COLLATE NOCASE` rewrite.
    fn needs_nocase_collation(&self) -> bool {
        false
    }

    /// Executes a SQL statement and returns ordered column names plus rows.
    async fn execute_query(&self, sql: &str) -> Result<RowSet, AskError>;

    /// Retrieves the introspected schema for a given table.
    async fn get_table_schema(&self, table_name: &str) -> Result<TableSchema, AskError>;

    /// Lists the user tables currently present in the store.
    async fn list_tables(&self) -> Result<Vec<String>, AskError>;
}

dyn_clone::clone_trait_object!(Storage);
