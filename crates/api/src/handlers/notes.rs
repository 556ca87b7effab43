//! Handlers for the `/api/notes` resource.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use notes_core::notes::{CreateNote, UpdateNote};
use serde::Deserialize;

use super::require_param;
use crate::error::AppResult;
use crate::extract::{JsonBody, JsonPath, JsonQuery};
use crate::state::AppState;

/// Base path used for `Location` headers.
pub const NOTES_URL: &str = "/api/notes";

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category_uuid: Option<String>,
}

/// GET /api/notes/{uuid}
pub async fn get_note(
    State(state): State<AppState>,
    JsonPath(uuid): JsonPath<String>,
) -> AppResult<impl IntoResponse> {
    let uuid = require_param(&uuid, "uuid")?;
    let note = state.notes.get_one(uuid).await?;

    Ok(Json(note))
}

/// GET /api/notes?category_uuid=X
///
/// All notes of a category. A category without notes is a 404.
pub async fn get_notes_by_category(
    State(state): State<AppState>,
    JsonQuery(params): JsonQuery<CategoryParams>,
) -> AppResult<impl IntoResponse> {
    let category_uuid = require_param(
        params.category_uuid.as_deref().unwrap_or_default(),
        "category_uuid",
    )?;
    let notes = state.notes.get_by_category_uuid(category_uuid).await?;

    Ok(Json(notes))
}

/// POST /api/notes
///
/// Responds 201 with a `Location` header and an empty body.
pub async fn create_note(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateNote>,
) -> AppResult<impl IntoResponse> {
    let uuid = state.notes.create(input).await?;

    tracing::info!(note_uuid = %uuid, "Note created");

    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("{NOTES_URL}/{uuid}"))],
    ))
}

/// PATCH /api/notes/{uuid}
pub async fn partially_update_note(
    State(state): State<AppState>,
    JsonPath(uuid): JsonPath<String>,
    JsonBody(changes): JsonBody<UpdateNote>,
) -> AppResult<impl IntoResponse> {
    let uuid = require_param(&uuid, "uuid")?;
    let tags_present = changes.tags_present();
    state.notes.update(uuid, &changes, tags_present).await?;

    tracing::info!(note_uuid = %uuid, tags_present, "Note updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/notes/{uuid}
pub async fn delete_note(
    State(state): State<AppState>,
    JsonPath(uuid): JsonPath<String>,
) -> AppResult<impl IntoResponse> {
    let uuid = require_param(&uuid, "uuid")?;
    state.notes.delete(uuid).await?;

    tracing::info!(note_uuid = %uuid, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}
