use askql::AskError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// Encapsulates the different kinds of errors that can cross the request
/// boundary, converting each into an appropriate HTTP response.
pub enum AppError {
    /// The request carried no usable question.
    MissingQuestion,
    /// Errors originating from the `askql` library.
    Ask(AskError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<AskError> for AppError {
    fn from(err: AskError) -> Self {
        AppError::Ask(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::MissingQuestion => {
                (StatusCode::BAD_REQUEST, "No question provided".to_string())
            }
            AppError::Ask(err) => {
                error!("AskError: {:?}", err);
                match err {
                    AskError::MissingAiProvider
                    | AskError::MissingStorageProvider
                    | AskError::MissingEmbedder => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server is not configured correctly.".to_string(),
                    ),
                    AskError::AiRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to AI provider failed: {e}"),
                    ),
                    AskError::AiDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize AI provider response: {e}"),
                    ),
                    AskError::AiApi(e) => {
                        (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}"))
                    }
                    AskError::Translation(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Translation service error: {e}"),
                    ),
                    AskError::StorageConnection(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Storage provider connection error: {e}"),
                    ),
                    AskError::StorageOperationFailed(e) => (
                        StatusCode::BAD_REQUEST,
                        format!("Storage operation failed: {e}"),
                    ),
                    AskError::Regex(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Internal regex error: {e}"),
                    ),
                    AskError::JsonSerialization(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to serialize result: {e}"),
                    ),
                    AskError::ReqwestClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build HTTP client: {e}"),
                    ),
                }
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
