use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Note routes mounted at `/notes`.
///
/// ```text
/// GET    /          -> get_notes_by_category
/// POST   /          -> create_note
/// GET    /{uuid}    -> get_note
/// PATCH  /{uuid}    -> partially_update_note
/// DELETE /{uuid}    -> delete_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notes::get_notes_by_category).post(notes::create_note),
        )
        .route(
            "/{uuid}",
            get(notes::get_note)
                .patch(notes::partially_update_note)
                .delete(notes::delete_note),
        )
}
