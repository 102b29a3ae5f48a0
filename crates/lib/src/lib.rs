//! # Natural Language to SQL
//!
//! This crate turns a free-text question into a safely-executed read-only SQL
//! query: language normalization, embedding-based schema linking, prompt
//! construction, generation via a configurable AI provider, output
//! sanitization and execution against a storage provider. An evaluation
//! harness replays a gold-standard test set through the same pipeline and
//! scores execution accuracy.

pub mod catalog;
pub mod errors;
pub mod eval;
pub mod executor;
pub mod linker;
pub mod normalize;
pub mod prompts;
pub mod providers;
pub mod sanitize;
pub mod types;

pub use errors::AskError;
pub use types::{AskClient, AskClientBuilder, QueryOutcome};

use tracing::{debug, error, info};

impl AskClient {
    /// Answers a natural language question with query results.
    ///
    /// The question is normalized to the working language (best-effort), a
    /// statement is generated and sanitized, and the result of executing it is
    /// returned. Every failure mode comes back as a structured
    /// `QueryOutcome::Failure`; this method never errors.
    pub async fn ask(&self, question: &str) -> QueryOutcome {
        info!("[ask] received question: {question:?}");

        let question = self.normalize_question(question).await;

        let statement = match self.generate_statement(&question).await {
            Ok(sql) => sql,
            Err(e) => {
                error!("[ask] generation failed: {e:?}");
                return QueryOutcome::failure(format!("AI Error: {e}"), String::new());
            }
        };

        if statement.is_empty() {
            return QueryOutcome::failure(
                "The question did not produce a valid query.",
                String::new(),
            );
        }

        executor::execute(self.storage.as_ref(), &statement).await
    }

    /// Translates the question into the working language when a translator is
    /// configured; otherwise passes it through unchanged.
    pub async fn normalize_question(&self, question: &str) -> String {
        match &self.translator {
            Some(translator) => normalize::normalize(translator.as_ref(), question).await,
            None => question.to_string(),
        }
    }

    /// Runs the generation stage: schema linking, prompt construction, model
    /// invocation and candidate extraction. Translation is not part of this
    /// stage; callers pass questions already in the working language.
    pub async fn generate_statement(&self, question: &str) -> Result<String, AskError> {
        let all_columns = catalog::list_columns(self.storage.as_ref()).await?;
        let context =
            linker::link(self.embedder.as_ref(), question, &all_columns, self.top_k).await?;

        let user_prompt = prompts::build_generation_prompt(question, &context);
        debug!(user_prompt = %user_prompt, "--> Sending prompt to AI provider");

        let raw_response = self
            .ai_provider
            .generate(prompts::SQL_GENERATION_SYSTEM_PROMPT, &user_prompt)
            .await?;

        debug!("<-- Raw model output: {raw_response}");

        sanitize::extract_statement(&raw_response)
    }
}
