use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thesis_core::error::CoreError;
use thesis_core::messages;

use crate::response::Envelope;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the standard failure envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `thesis_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A request body that could not be parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    /// Failures are reported in-band: the HTTP status is always 200 and the
    /// envelope carries `status: false` plus a message code.
    fn into_response(self) -> Response {
        let (key, fields) = match &self {
            AppError::Core(core) => {
                match core {
                    CoreError::Internal(msg) => {
                        tracing::error!(error = %msg, "Internal core error");
                    }
                    CoreError::Conflict(msg) => {
                        tracing::warn!(error = %msg, "Conflict");
                    }
                    _ => {}
                }
                (core.message_key(), core.invalid_fields().map(<[String]>::to_vec))
            }

            AppError::Database(err) => (classify_sqlx_error(err), None),

            AppError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "Rejected request body");
                (messages::PARAM_ERROR, None)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (messages::SYSTEM_ERROR, None)
            }
        };

        (StatusCode::OK, Json(Envelope::failure(key, fields))).into_response()
    }
}

/// Classify a sqlx error into a message-registry key.
///
/// - `RowNotFound` maps to `NOT_FOUND`.
/// - Unique constraint violations (constraint name starting with `uq_`) map to `CONFLICT`.
/// - Everything else maps to `SYSTEM_ERROR` and is logged.
fn classify_sqlx_error(err: &sqlx::Error) -> &'static str {
    match err {
        sqlx::Error::RowNotFound => messages::NOT_FOUND,
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    tracing::warn!(constraint, "Unique constraint violation");
                    return messages::CONFLICT;
                }
            }
            tracing::error!(error = %db_err, "Database error");
            messages::SYSTEM_ERROR
        }
        other => {
            tracing::error!(error = %other, "Database error");
            messages::SYSTEM_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_fields_render_in_band() {
        let (status, json) =
            render(CoreError::MissingFields(vec!["email".into(), "code".into()]).into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], false);
        assert_eq!(json["message"], messages::resolve(messages::MISSING_FIELDS));
        assert_eq!(json["validateError"], serde_json::json!(["email", "code"]));
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let (status, json) =
            render(AppError::InternalError("disk on fire at /var/lib".into())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], messages::resolve(messages::SYSTEM_ERROR));
        assert!(!json.to_string().contains("disk on fire"));
    }

    #[tokio::test]
    async fn row_not_found_is_not_found() {
        let (_, json) = render(sqlx::Error::RowNotFound.into()).await;
        assert_eq!(json["message"], messages::resolve(messages::NOT_FOUND));
        assert!(json.get("validateError").is_none());
    }
}
