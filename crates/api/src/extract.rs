//! Request extractors that report failures through [`AppError`].
//!
//! The stock axum extractors answer a rejection with a plain-text body. These
//! wrappers keep the error JSON shape for every undecodable request part.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Message returned for any body that cannot be decoded into the target type.
pub const INVALID_DATA: &str = "invalid data";

pub const INVALID_PATH: &str = "invalid path parameter";

pub const INVALID_QUERY: &str = "invalid query parameters";

/// JSON body extractor.
///
/// Same as [`axum::Json`], except that malformed JSON, a missing or wrong
/// `Content-Type` and missing required fields all become
/// [`AppError::BadRequest`] with [`INVALID_DATA`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
                Err(AppError::BadRequest(INVALID_DATA.to_string()))
            }
        }
    }
}

/// [`axum::extract::Path`] with rejections mapped to [`INVALID_PATH`],
/// e.g. a segment that is not valid UTF-8 once percent-decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPath<T>(pub T);

impl<S, T> FromRequestParts<S> for JsonPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(JsonPath(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected path parameters");
                Err(AppError::BadRequest(INVALID_PATH.to_string()))
            }
        }
    }
}

/// [`axum::extract::Query`] with rejections mapped to [`INVALID_QUERY`],
/// e.g. a repeated key.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for JsonQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(JsonQuery(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected query string");
                Err(AppError::BadRequest(INVALID_QUERY.to_string()))
            }
        }
    }
}
