use axum::routing::get;
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Tag routes mounted at `/tags`.
///
/// ```text
/// GET    /        -> get_tags
/// POST   /        -> create_tag
/// GET    /{id}    -> get_tag
/// PATCH  /{id}    -> update_tag
/// DELETE /{id}    -> delete_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::get_tags).post(tags::create_tag))
        .route(
            "/{id}",
            get(tags::get_tag)
                .patch(tags::update_tag)
                .delete(tags::delete_tag),
        )
}
