//! # Schema Catalog
//!
//! Derives everything the pipeline knows about the data model from live
//! storage introspection: a compact DDL-like description for prompts, the
//! flat list of `table.column` references the linker ranks, and the text
//! columns the collation rewrite applies to. Nothing here is cached; the
//! catalog always reflects the store as it is right now.

use crate::errors::AskError;
use crate::providers::db::storage::Storage;
use crate::types::FieldType;

/// The coarse type label used in schema descriptions.
fn coarse_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Integer => "INT",
        _ => "TEXT",
    }
}

/// Produces a compact, DDL-like description of every user table, e.g.
/// `CREATE TABLE api_customer (id INT, name TEXT, ...) CREATE TABLE ...`.
pub async fn describe_schema(storage: &dyn Storage) -> Result<String, AskError> {
    let mut parts = Vec::new();
    for table in storage.list_tables().await? {
        let schema = storage.get_table_schema(&table).await?;
        let columns = schema
            .fields
            .iter()
            .map(|f| format!("{} {}", f.name, coarse_type(f.r#type)))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("CREATE TABLE {table} ({columns})"));
    }
    Ok(parts.join(" "))
}

/// Lists every column as a fully-qualified `table.column` reference, in table
/// order then column order. This is the schema linker's search space.
pub async fn list_columns(storage: &dyn Storage) -> Result<Vec<String>, AskError> {
    let mut columns = Vec::new();
    for table in storage.list_tables().await? {
        let schema = storage.get_table_schema(&table).await?;
        for field in &schema.fields {
            columns.push(format!("{table}.{}", field.name));
        }
    }
    Ok(columns)
}

/// Lists the bare names of all text-typed columns. Only genuinely textual
/// declarations count; REAL/NUMERIC columns display as TEXT in the schema
/// description but must not receive a collation rewrite.
pub async fn text_columns(storage: &dyn Storage) -> Result<Vec<String>, AskError> {
    let mut columns = Vec::new();
    for table in storage.list_tables().await? {
        let schema = storage.get_table_schema(&table).await?;
        for field in &schema.fields {
            if field.r#type == FieldType::String && !columns.contains(&field.name) {
                columns.push(field.name.clone());
            }
        }
    }
    Ok(columns)
}
