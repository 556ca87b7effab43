use std::any::Any;
use std::error::Error as StdError;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notes_core::error::{CoreError, ErrorKind};
use serde::Serialize;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds the HTTP-only decode,
/// timeout and panic failures. Implements [`IntoResponse`] so every failure yields exactly one
/// JSON error response.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `notes_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Undecodable input or a malformed path/query parameter.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request outlived `REQUEST_TIMEOUT_SECS`.
    #[error("Request timed out")]
    Timeout,

    /// A handler panicked; the payload is only logged.
    #[error("Handler panicked: {0}")]
    Panicked(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub developer_message: String,
    pub code: &'static str,
}

const BAD_REQUEST_HINT: &str = "something wrong with user data";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: msg.clone(),
                    developer_message: BAD_REQUEST_HINT.to_string(),
                    code: "BAD_REQUEST",
                },
            ),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                ErrorBody {
                    message: "request timeout".to_string(),
                    developer_message: "the request did not complete in time".to_string(),
                    code: "REQUEST_TIMEOUT",
                },
            ),
            AppError::Panicked(detail) => {
                tracing::error!(panic = %detail, "Handler panicked");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: "internal system error".to_string(),
                        developer_message: "unexpected failure while handling the request"
                            .to_string(),
                        code: "INTERNAL_ERROR",
                    },
                )
            }
            AppError::Core(core) => match core.kind() {
                ErrorKind::BadRequest => (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        message: core.to_string(),
                        developer_message: BAD_REQUEST_HINT.to_string(),
                        code: "BAD_REQUEST",
                    },
                ),
                ErrorKind::NotFound => (
                    StatusCode::NOT_FOUND,
                    ErrorBody {
                        message: "not found".to_string(),
                        developer_message: core.to_string(),
                        code: "NOT_FOUND",
                    },
                ),
                ErrorKind::Internal => {
                    tracing::error!(error = %error_chain(core), "Internal error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody {
                            message: "internal system error".to_string(),
                            developer_message: core.to_string(),
                            code: "INTERNAL_ERROR",
                        },
                    )
                }
            },
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Response for a panic caught by `CatchPanicLayer`.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Panicked(detail).into_response()
}

/// Give the bodiless 408 produced by `TimeoutLayer` the JSON error shape.
pub async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(CONTENT_TYPE)
    {
        return AppError::Timeout.into_response();
    }
    response
}

/// Render an error and all of its sources as `outer: inner: root`.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Refused;

    impl fmt::Display for Refused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection refused")
        }
    }

    impl StdError for Refused {}

    #[test]
    fn panic_payload_text_is_recovered() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn error_chain_joins_every_source() {
        let err = CoreError::internal("database query failed", Refused)
            .context("failed to update note");
        assert_eq!(
            error_chain(&err),
            "failed to update note: database query failed: connection refused"
        );
    }
}
