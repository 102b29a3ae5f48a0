use crate::errors::AskError;
use crate::providers::db::storage::Storage;
use crate::types::{FieldType, RowSet, TableField, TableSchema};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::{self, Debug};
use tracing::{debug, info};
use turso::{Database, Value as TursoValue};

pub mod sql;

/// A provider for interacting with a local SQLite database using Turso.
///
/// This provider holds a `Database` instance, which manages a connection pool.
/// When cloned, it shares the same underlying database, allowing for concurrent
/// and shared access to the same database file or in-memory instance.
#[derive(Clone)]
pub struct SqliteProvider {
    /// The Turso database instance. It's cloneable and thread-safe.
    pub db: Database,
}

impl SqliteProvider {
    /// Creates a new `SqliteProvider` from a file path or in-memory.
    ///
    /// # Arguments
    ///
    /// * `db_path`: The path to the SQLite database file. Use ":memory:" for a
    ///   unique, isolated in-memory database. To share an in-memory database
    ///   across multiple `SqliteProvider` instances (e.g., in tests), create
    ///   one provider and then `.clone()` it.
    pub async fn new(db_path: &str) -> Result<Self, AskError> {
        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| AskError::StorageConnection(e.to_string()))?;

        // WAL improves concurrency for file-based databases and is a no-op
        // for in-memory ones.
        let conn = db
            .connect()
            .map_err(|e| AskError::StorageConnection(e.to_string()))?;
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| AskError::StorageConnection(e.to_string()))?;

        Ok(Self { db })
    }

    /// Executes multiple `;`-separated SQL statements, e.g. to pre-populate a
    /// test database.
    pub async fn initialize_with_data(&self, init_sql: &str) -> Result<(), AskError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| AskError::StorageConnection(e.to_string()))?;

        for statement in init_sql.split(';').filter(|s| !s.trim().is_empty()) {
            conn.execute(statement, ())
                .await
                .map_err(|e| AskError::StorageOperationFailed(e.to_string()))?;
        }
        Ok(())
    }

    /// Ensures that all application tables exist. Idempotent, safe to call on
    /// every startup.
    pub async fn initialize_schema(&self) -> Result<(), AskError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| AskError::StorageConnection(e.to_string()))?;

        for statement in sql::TABLE_CREATION_SQL {
            conn.execute(statement, ())
                .await
                .map_err(|e| AskError::StorageOperationFailed(e.to_string()))?;
        }
        Ok(())
    }

    /// Clears all rows and re-inserts the deterministic mock dataset.
    pub async fn seed_mock_data(&self) -> Result<(), AskError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| AskError::StorageConnection(e.to_string()))?;

        for statement in sql::SEED_DATA_SQL {
            conn.execute(statement, ())
                .await
                .map_err(|e| AskError::StorageOperationFailed(e.to_string()))?;
        }
        info!("Mock data seeded.");
        Ok(())
    }
}

impl Debug for SqliteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteProvider").finish_non_exhaustive()
    }
}

impl AsRef<Database> for SqliteProvider {
    fn as_ref(&self) -> &Database {
        &self.db
    }
}

/// Converts a Turso value to a serde_json::Value.
fn turso_value_to_json(v: TursoValue) -> Value {
    match v {
        TursoValue::Null => Value::Null,
        TursoValue::Integer(i) => Value::Number(i.into()),
        TursoValue::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        TursoValue::Text(s) => Value::String(s),
        TursoValue::Blob(_) => Value::String("<blob>".to_string()),
    }
}

/// Maps a declared SQLite column type to the coarse field type.
fn field_type_from_declaration(declared: &str) -> FieldType {
    let upper = declared.to_uppercase();
    if upper.contains("INT") {
        FieldType::Integer
    } else if upper.contains("CHAR") || upper.contains("TEXT") || upper.contains("CLOB") {
        FieldType::String
    } else if upper.contains("BLOB") {
        FieldType::Bytes
    } else if upper.contains("REAL")
        || upper.contains("FLOA")
        || upper.contains("DOUB")
        || upper.contains("DEC")
        || upper.contains("NUMERIC")
    {
        FieldType::Float
    } else if upper.contains("TIMESTAMP") || upper.contains("DATETIME") {
        FieldType::Timestamp
    } else if upper.contains("DATE") {
        FieldType::Date
    } else {
        // NUMERIC affinity oddities and unknown declarations default to text.
        FieldType::String
    }
}

#[async_trait]
impl Storage for SqliteProvider {
    fn name(&self) -> &str {
        "SQLite"
    }

    /// SQLite compares TEXT case-sensitively unless told otherwise.
    fn needs_nocase_collation(&self) -> bool {
        true
    }

    /// Executes a statement and returns ordered column names plus rows, each
    /// row a JSON object keyed by column name.
    async fn execute_query(&self, sql: &str) -> Result<RowSet, AskError> {
        debug!(sql = %sql, "--> Executing SQLite query");

        let conn = self
            .db
            .connect()
            .map_err(|e| AskError::StorageConnection(e.to_string()))?;

        let mut stmt = conn
            .prepare(sql)
            .await
            .map_err(|e| AskError::StorageOperationFailed(e.to_string()))?;

        let columns: Vec<String> = stmt
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let mut rows = stmt
            .query(())
            .await
            .map_err(|e| AskError::StorageOperationFailed(e.to_string()))?;

        let mut results: Vec<Value> = Vec::new();

        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AskError::StorageOperationFailed(e.to_string()))?
        {
            let mut row_map = serde_json::Map::new();
            for (i, name) in columns.iter().enumerate() {
                let value = row
                    .get_value(i)
                    .map_err(|e| AskError::StorageOperationFailed(e.to_string()))?;
                row_map.insert(name.clone(), turso_value_to_json(value));
            }
            results.push(Value::Object(row_map));
        }

        Ok(RowSet {
            columns,
            rows: results,
        })
    }

    /// Retrieves the schema for a given SQLite table via `PRAGMA table_info`.
    async fn get_table_schema(&self, table_name: &str) -> Result<TableSchema, AskError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| AskError::StorageConnection(e.to_string()))?;

        let query = format!("PRAGMA table_info({table_name});");
        let mut rows = conn
            .query(&query, ())
            .await
            .map_err(|e| AskError::StorageOperationFailed(e.to_string()))?;

        let mut fields = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AskError::StorageOperationFailed(e.to_string()))?
        {
            // PRAGMA table_info columns: cid, name, type, notnull, dflt_value, pk
            if let (Ok(TursoValue::Text(name)), Ok(TursoValue::Text(type_str))) =
                (row.get_value(1), row.get_value(2))
            {
                fields.push(TableField {
                    name,
                    r#type: field_type_from_declaration(&type_str),
                });
            }
        }

        if fields.is_empty() {
            return Err(AskError::StorageOperationFailed(format!(
                "Table '{table_name}' not found or has no columns."
            )));
        }

        Ok(TableSchema { fields })
    }

    async fn list_tables(&self) -> Result<Vec<String>, AskError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| AskError::StorageConnection(e.to_string()))?;

        let mut rows = conn
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name;",
                (),
            )
            .await
            .map_err(|e| AskError::StorageOperationFailed(e.to_string()))?;

        let mut tables = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AskError::StorageOperationFailed(e.to_string()))?
        {
            if let Ok(TursoValue::Text(name)) = row.get_value(0) {
                tables.push(name);
            }
        }
        Ok(tables)
    }
}
