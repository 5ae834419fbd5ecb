//! Route definitions for the game catalog.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::games;
use crate::state::AppState;

/// Routes mounted at `/games`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /search?q=       -> search
/// POST   /save-order      -> save_order
/// GET    /ping            -> ping
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(games::list).post(games::create))
        .route("/search", get(games::search))
        .route("/save-order", post(games::save_order))
        .route("/ping", get(games::ping))
        .route(
            "/{id}",
            get(games::get_by_id)
                .put(games::update)
                .delete(games::delete),
        )
}
