//! [`GameStore`] backed by PostgreSQL.

use async_trait::async_trait;
use gamelib_core::catalog::ENTITY;
use gamelib_core::error::CoreError;
use gamelib_core::game::{Game, GameFields};
use gamelib_core::position::Position;
use gamelib_core::store::GameStore;
use gamelib_core::types::DbId;

use crate::models::game::position_to_column;
use crate::repositories::GameRepo;
use crate::DbPool;

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// Game store over a shared connection pool. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PgGameStore {
    pool: DbPool,
}

impl PgGameStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Classify a sqlx error into the core error taxonomy.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to [`CoreError::Conflict`].
/// - Everything else maps to [`CoreError::Internal`] and is logged.
pub fn map_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(err.to_string())
}

#[async_trait]
impl GameStore for PgGameStore {
    async fn create(&self, fields: &GameFields) -> Result<Game, CoreError> {
        let sort_order = position_to_column(fields.sort_order)?;
        GameRepo::create(&self.pool, fields, sort_order)
            .await
            .map_err(map_sqlx_error)
    }

    async fn save(&self, game: &Game) -> Result<Game, CoreError> {
        let sort_order = position_to_column(game.fields.sort_order)?;
        GameRepo::replace(&self.pool, game.id, &game.fields, sort_order)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(CoreError::NotFound {
                entity: ENTITY,
                id: game.id,
            })
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Game>, CoreError> {
        GameRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn exists(&self, id: DbId) -> Result<bool, CoreError> {
        GameRepo::exists(&self.pool, id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), CoreError> {
        GameRepo::delete(&self.pool, id)
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }

    async fn count(&self) -> Result<u64, CoreError> {
        let count = GameRepo::count(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn set_position(&self, id: DbId, position: Position) -> Result<bool, CoreError> {
        let sort_order = position_to_column(position)?;
        GameRepo::set_sort_order(&self.pool, id, sort_order)
            .await
            .map_err(map_sqlx_error)
    }

    async fn list_ordered(&self) -> Result<Vec<Game>, CoreError> {
        GameRepo::list_ordered(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn search_title(&self, query: &str) -> Result<Vec<Game>, CoreError> {
        GameRepo::search_title(&self.pool, query)
            .await
            .map_err(map_sqlx_error)
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}
