//! # Schema Linker
//!
//! Raw schemas can be large; sending every column to the generation service
//! degrades prompt quality. This module ranks all known column references by
//! semantic similarity to the question and keeps only the most relevant
//! slice, regrouped into the `table: col, col | table2: col` form the
//! generation model was trained on. The delimiter and grouping are part of
//! that contract: a deviation degrades generation quality without raising.

use crate::errors::AskError;
use crate::providers::ai::Embedder;
use std::cmp::Ordering;
use tracing::debug;

/// Cosine similarity with a zero-norm guard.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = norm_a * norm_b;
    if denom < 1e-10 {
        0.0
    } else {
        dot / denom
    }
}

/// Regroups ranked `table.column` references into the compact
/// `table: col, col | table2: col` prompt form. Tables appear in order of
/// their highest-ranked column; columns keep rank order within each table.
pub fn group_by_table(references: &[&str]) -> String {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for reference in references {
        let (table, column) = match reference.split_once('.') {
            Some(parts) => parts,
            None => ("", *reference),
        };
        match groups.iter_mut().find(|(t, _)| *t == table) {
            Some((_, columns)) => columns.push(column),
            None => groups.push((table, vec![column])),
        }
    }
    groups
        .into_iter()
        .map(|(table, columns)| {
            if table.is_empty() {
                columns.join(", ")
            } else {
                format!("{table}: {}", columns.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Selects the `top_k` columns most similar to the question and returns the
/// grouped linked context. Ties keep the original column order.
pub async fn link(
    embedder: &dyn Embedder,
    question: &str,
    all_columns: &[String],
    top_k: usize,
) -> Result<String, AskError> {
    if all_columns.is_empty() {
        return Ok(String::new());
    }

    let question_vector = embedder.embed(question).await?;

    let mut scored: Vec<(usize, f32)> = Vec::with_capacity(all_columns.len());
    for (index, column) in all_columns.iter().enumerate() {
        let column_vector = embedder.embed(column).await?;
        scored.push((index, cosine_similarity(&question_vector, &column_vector)));
    }

    // Stable sort: equal scores keep schema order.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let selected: Vec<&str> = scored
        .iter()
        .take(top_k)
        .map(|(index, _)| all_columns[*index].as_str())
        .collect();

    let context = group_by_table(&selected);
    debug!(question = %question, context = %context, "Linked schema context");
    Ok(context)
}
