//! # SQL Sanitizer
//!
//! Model output is never trusted. This module extracts a single candidate
//! statement from raw generation output, enforces a read-only allow-list, and
//! rewrites text-equality predicates to be case-insensitive on backends that
//! compare text case-sensitively by default.
//!
//! The keyword scan is a crude substring check, not a parser. It rejects
//! legitimate statements touching columns like `updated_at`; that false
//! positive rate is the accepted cost of a scanner with no parsing surface.

use crate::errors::AskError;
use regex::Regex;

/// Keywords that mark a statement as mutating. Matched as substrings of the
/// uppercased statement.
pub const FORBIDDEN_KEYWORDS: &[&str] = &["DROP", "DELETE", "UPDATE", "INSERT", "ALTER", "TRUNCATE"];

/// Extracts a single candidate statement from raw model output.
///
/// Models sometimes echo the prompt before the query, so everything before
/// the *last* `SELECT` (case-insensitive) is discarded; if no `SELECT` is
/// present the raw text is used as-is. The candidate is then truncated at the
/// first statement terminator or line break and trimmed.
pub fn extract_statement(raw: &str) -> Result<String, AskError> {
    let select_re = Regex::new(r"(?i)SELECT")?;
    let candidate = match select_re.find_iter(raw).last() {
        Some(m) => &raw[m.start()..],
        None => raw,
    };

    let candidate = candidate.split([';', '\n']).next().unwrap_or(candidate);
    Ok(candidate.trim().to_string())
}

/// Rejects statements containing any forbidden keyword.
///
/// The returned message is a result for the caller to surface, not an error
/// to raise.
pub fn check_read_only(sql: &str) -> Result<(), String> {
    let upper = sql.to_uppercase();
    if FORBIDDEN_KEYWORDS.iter().any(|word| upper.contains(word)) {
        return Err("Security violation: Only SELECT allowed.".to_string());
    }
    Ok(())
}

/// Rewrites `column = 'literal'` predicates to `column COLLATE NOCASE =
/// 'literal'` for each known text column.
///
/// Matching is case-insensitive, tolerates an optional `table.` qualifier,
/// and leaves predicates that already carry a collation clause untouched, so
/// the rewrite is idempotent.
pub fn apply_nocase_collation(sql: &str, text_columns: &[String]) -> Result<String, AskError> {
    let mut rewritten = sql.to_string();
    for column in text_columns {
        let pattern = format!(
            r#"(?i)\b(?P<qual>(?:\w+\.)?)(?P<col>{col})\b(?P<coll>\s+COLLATE\s+\w+)?\s*=\s*(?P<val>'[^']*'|"[^"]*")"#,
            col = regex::escape(column)
        );
        let re = Regex::new(&pattern)?;
        rewritten = re
            .replace_all(&rewritten, |caps: &regex::Captures| {
                if caps.name("coll").is_some() {
                    caps[0].to_string()
                } else {
                    format!(
                        "{}{} COLLATE NOCASE = {}",
                        &caps["qual"], &caps["col"], &caps["val"]
                    )
                }
            })
            .into_owned();
    }
    Ok(rewritten)
}
