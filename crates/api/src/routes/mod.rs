pub mod games;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /games                  list, create
/// /games/search           title search (?q=)
/// /games/save-order       reorder (POST, body: [id, ...])
/// /games/ping             liveness
/// /games/{id}             get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/games", games::router())
}
