//! # Prompt Templates
//!
//! The generation prompt pairs the question with the linked-context output of
//! the schema linker. The terse `translate English to SQL` form matches the
//! generation model's training format; do not mix it with a full-schema
//! instruction template.

/// The system prompt for the query generation stage.
pub const SQL_GENERATION_SYSTEM_PROMPT: &str = "You are a text-to-SQL model. \
Respond with a single readonly SQL statement and nothing else.";

/// The user prompt template for the query generation stage.
///
/// Placeholders: `{question}`, `{context}` (the grouped linked columns).
pub const SQL_GENERATION_USER_TEMPLATE: &str =
    "translate English to SQL: {question} </s> {context}";

/// Builds the user prompt from a normalized question and its linked context.
pub fn build_generation_prompt(question: &str, linked_context: &str) -> String {
    SQL_GENERATION_USER_TEMPLATE
        .replace("{question}", question)
        .replace("{context}", linked_context)
}
