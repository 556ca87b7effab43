pub mod health;
pub mod notes;
pub mod tags;

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /heartbeat              liveness (204)
///
/// /notes                  list by ?category_uuid=, create
/// /notes/{uuid}           get, partial update, delete
///
/// /tags                   list by ?id=1,2,3, create
/// /tags/{id}              get, partial update, delete
/// ```
///
/// Every response from this tree is labelled `application/json`, including
/// 201 and 204 responses without a body.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/heartbeat", get(handlers::health::heartbeat))
        .nest("/notes", notes::router())
        .nest("/tags", tags::router())
        .layer(SetResponseHeaderLayer::overriding(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
}
