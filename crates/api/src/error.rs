use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use microlearn_core::error::CoreError;
use microlearn_core::lesson_parser::InvalidLesson;
use microlearn_delivery::DeliveryError;
use microlearn_generation::GenerationError;
use microlearn_pipeline::ProgressionError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain and generation errors and adds HTTP-specific variants.
/// Every response body is JSON with at least `error` and `code`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `microlearn_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The generation provider failed or sent an unexpected envelope.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The provider answered with text that is not a usable lesson.
    #[error("Generated lesson rejected: {0}")]
    GenerationFailed(InvalidLesson),

    /// The daily lesson could not be emailed.
    #[error("Failed to send email: {0}")]
    Delivery(#[from] DeliveryError),

    /// Daily lesson delivery is not configured on this server.
    #[error("Lesson delivery is not configured")]
    DeliveryUnavailable,

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ProgressionError> for AppError {
    fn from(err: ProgressionError) -> Self {
        match err {
            ProgressionError::Core(e) => AppError::Core(e),
            ProgressionError::Database(e) => AppError::Database(e),
            ProgressionError::Generation(GenerationError::Config(msg)) => {
                AppError::InternalError(msg)
            }
            ProgressionError::Generation(e) => AppError::Generation(e),
            ProgressionError::GenerationFailed(invalid) => AppError::GenerationFailed(invalid),
            ProgressionError::Delivery(e) => AppError::Delivery(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Generation ---
            AppError::Generation(err) => classify_generation_error(err),
            AppError::GenerationFailed(invalid) => {
                let body = json!({
                    "error": invalid.error,
                    "code": "GENERATION_FAILED",
                    "rawContent": invalid.raw_content,
                });
                return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response();
            }

            // --- Database errors ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal()
            }

            // --- Delivery ---
            AppError::Delivery(err) => {
                tracing::error!(error = %err, "Lesson email delivery failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DELIVERY_FAILED",
                    "Failed to send email".to_string(),
                )
            }
            AppError::DeliveryUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "DELIVERY_UNAVAILABLE",
                self.to_string(),
            ),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a generation error into an HTTP status, error code, and message.
///
/// Provider failures keep their message so the client can show it;
/// configuration problems are sanitized.
fn classify_generation_error(err: &GenerationError) -> (StatusCode, &'static str, String) {
    match err {
        GenerationError::Request(_) | GenerationError::Api { .. } => {
            tracing::error!(error = %err, "Generation provider error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROVIDER_ERROR",
                err.to_string(),
            )
        }
        GenerationError::MalformedResponse(_) => {
            tracing::error!(error = %err, "Malformed provider response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MALFORMED_RESPONSE",
                err.to_string(),
            )
        }
        GenerationError::Config(msg) => {
            tracing::error!(error = %msg, "Generation config error");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
