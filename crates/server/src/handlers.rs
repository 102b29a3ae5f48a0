//! # Route Handlers
//!
//! The Axum handlers for the `askql-server`: the main question endpoint, the
//! schema description endpoint, and the evaluation endpoint.

use crate::{errors::AppError, state::AppState};
use askql::eval::{run_evaluation, EvaluationReport};
use askql::{catalog, QueryOutcome};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

// --- API Payloads ---

#[derive(Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SchemaResponse {
    pub schema: String,
}

// --- Handlers ---

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "askql server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The primary handler: turns a free-text question into executed results.
///
/// The response body is the pipeline's `QueryOutcome`: either
/// `{columns, data, sql}` or `{error, sql}`, always with the attempted SQL
/// echoed. Only a missing question is an HTTP-level error.
pub async fn ask_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<QueryOutcome>, AppError> {
    let question = payload
        .question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or(AppError::MissingQuestion)?;

    info!("Received question: {question:?}");
    Ok(Json(app_state.client.ask(question).await))
}

/// Returns the current schema description, regenerated on every request.
pub async fn schema_handler(
    State(app_state): State<AppState>,
) -> Result<Json<SchemaResponse>, AppError> {
    let schema = catalog::describe_schema(app_state.client.storage.as_ref()).await?;
    Ok(Json(SchemaResponse { schema }))
}

/// Replays the gold-standard test set and reports execution accuracy.
pub async fn evaluate_handler(State(app_state): State<AppState>) -> Json<EvaluationReport> {
    Json(run_evaluation(&app_state.client).await)
}
