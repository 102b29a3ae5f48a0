//! # Query Executor
//!
//! Runs a sanitized candidate statement against the storage provider and
//! always returns a structured `QueryOutcome`: backend failures become
//! `{error, sql}` results, never panics or bubbled errors. This is the only
//! path by which generated SQL reaches the store.

use crate::errors::AskError;
use crate::providers::db::storage::Storage;
use crate::types::QueryOutcome;
use crate::{catalog, sanitize};
use tracing::{debug, warn};

/// Checks, rewrites and executes a candidate statement.
///
/// The forbidden-keyword scan runs first; on backends without case-insensitive
/// default text comparison, equality predicates on known text columns are
/// rewritten with `COLLATE NOCASE` before execution.
pub async fn execute(storage: &dyn Storage, sql: &str) -> QueryOutcome {
    if let Err(violation) = sanitize::check_read_only(sql) {
        warn!(sql = %sql, "Rejected statement: {violation}");
        return QueryOutcome::failure(violation, sql);
    }

    let final_sql = if storage.needs_nocase_collation() {
        let text_columns = match catalog::text_columns(storage).await {
            Ok(columns) => columns,
            Err(e) => return QueryOutcome::failure(format!("Database Error: {e}"), sql),
        };
        match sanitize::apply_nocase_collation(sql, &text_columns) {
            Ok(rewritten) => rewritten,
            Err(e) => return QueryOutcome::failure(format!("Database Error: {e}"), sql),
        }
    } else {
        sql.to_string()
    };

    debug!(sql = %final_sql, "Executing sanitized statement");

    match storage.execute_query(&final_sql).await {
        Ok(row_set) => QueryOutcome::rows(row_set.columns, row_set.rows, final_sql),
        Err(e) => QueryOutcome::failure(format!("Database Error: {e}"), final_sql),
    }
}
