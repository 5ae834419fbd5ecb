//! Persistence seam for the catalog.
//!
//! The [`CatalogManager`](crate::catalog::CatalogManager) never talks to a
//! database directly; it drives an implementation of [`GameStore`]. The
//! PostgreSQL implementation lives in the db crate, and an in-memory one in
//! [`crate::memory`].

use async_trait::async_trait;

use crate::error::CoreError;
use crate::game::{Game, GameFields};
use crate::position::Position;
use crate::types::DbId;

/// Durable record keeper for games.
///
/// Every method is one atomic write or one consistent read. Uniqueness
/// violations (duplicate title) are reported as [`CoreError::Conflict`].
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Insert a new game; the store assigns the id.
    async fn create(&self, fields: &GameFields) -> Result<Game, CoreError>;

    /// Replace every field of an existing game, collections included.
    ///
    /// Returns [`CoreError::NotFound`] if the row does not exist.
    async fn save(&self, game: &Game) -> Result<Game, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Game>, CoreError>;

    async fn exists(&self, id: DbId) -> Result<bool, CoreError>;

    /// Remove a game and its collections. Callers check [`Self::exists`] first.
    async fn delete_by_id(&self, id: DbId) -> Result<(), CoreError>;

    async fn count(&self) -> Result<u64, CoreError>;

    /// Write only the position of one game.
    ///
    /// Returns `false` if no game has that id.
    async fn set_position(&self, id: DbId, position: Position) -> Result<bool, CoreError>;

    /// All games in catalog order (position, then id; unassigned last).
    async fn list_ordered(&self) -> Result<Vec<Game>, CoreError>;

    /// Games whose title contains `query`, ignoring case, in catalog order.
    async fn search_title(&self, query: &str) -> Result<Vec<Game>, CoreError>;

    /// Cheap liveness probe for health checks.
    async fn ping(&self) -> Result<(), CoreError>;
}
