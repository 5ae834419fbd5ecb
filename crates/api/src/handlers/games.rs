//! Handlers for the `/games` resource.
//!
//! Thin translation between HTTP and the [`CatalogManager`]: no ordering or
//! validation logic lives here.
//!
//! [`CatalogManager`]: gamelib_core::catalog::CatalogManager

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gamelib_core::game::GameFields;
use gamelib_core::types::DbId;

use crate::error::AppResult;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/games
///
/// Full catalog in display order. Heals unassigned positions as a side effect.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let games = state.catalog.list().await?;
    tracing::debug!(count = games.len(), "Listed games");
    Ok(Json(DataResponse { data: games }))
}

/// POST /api/v1/games
///
/// Create a game. Without `sortOrder` it is appended at the end.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<GameFields>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let game = state.catalog.add(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: game })))
}

/// GET /api/v1/games/search?q=
///
/// Case-insensitive title search. Does not heal positions.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let games = state.catalog.search(&params.q).await?;
    Ok(Json(DataResponse { data: games }))
}

/// POST /api/v1/games/save-order
///
/// Body is the desired order as a JSON array of ids. Unknown ids are skipped
/// and reported back.
pub async fn save_order(
    State(state): State<AppState>,
    payload: Result<Json<Vec<DbId>>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(ids) = payload?;
    let outcome = state.catalog.reorder(&ids).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/games/ping
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /api/v1/games/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let game = state.catalog.get_by_id(id).await?;
    Ok(Json(DataResponse { data: game }))
}

/// PUT /api/v1/games/{id}
///
/// Full replacement: omitted fields are cleared, not kept.
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<GameFields>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let game = state.catalog.update(id, input).await?;
    Ok(Json(DataResponse { data: game }))
}

/// DELETE /api/v1/games/{id}
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    state.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
