//! Handlers for the `/api/tags` resource.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use notes_core::tags::{parse_id_list, CreateTag, UpdateTag};
use notes_core::types::DbId;
use serde::Deserialize;

use super::require_param;
use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, JsonPath, JsonQuery};
use crate::state::AppState;

/// Base path used for `Location` headers.
pub const TAGS_URL: &str = "/api/tags";

#[derive(Debug, Deserialize)]
pub struct TagIdsParams {
    /// Comma-separated tag ids, e.g. `1,2,3`.
    pub id: Option<String>,
}

fn parse_tag_id(raw: &str) -> AppResult<DbId> {
    let raw = require_param(raw, "id")?;
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("id must be an integer, got '{raw}'")))
}

/// GET /api/tags?id=1,2,3
pub async fn get_tags(
    State(state): State<AppState>,
    JsonQuery(params): JsonQuery<TagIdsParams>,
) -> AppResult<impl IntoResponse> {
    let ids = parse_id_list(params.id.as_deref().unwrap_or_default())?;
    let tags = state.tags.get_many(&ids).await?;

    Ok(Json(tags))
}

/// GET /api/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    JsonPath(id): JsonPath<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_tag_id(&id)?;
    let tag = state.tags.get_one(id).await?;

    Ok(Json(tag))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTag>,
) -> AppResult<impl IntoResponse> {
    let id = state.tags.create(input).await?;

    tracing::info!(tag_id = id, "Tag created");

    Ok((StatusCode::CREATED, [(LOCATION, format!("{TAGS_URL}/{id}"))]))
}

/// PATCH /api/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    JsonPath(id): JsonPath<String>,
    JsonBody(changes): JsonBody<UpdateTag>,
) -> AppResult<impl IntoResponse> {
    let id = parse_tag_id(&id)?;
    state.tags.update(id, &changes).await?;

    tracing::info!(tag_id = id, "Tag updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    JsonPath(id): JsonPath<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_tag_id(&id)?;
    state.tags.delete(id).await?;

    tracing::info!(tag_id = id, "Tag deleted");

    Ok(StatusCode::NO_CONTENT)
}
