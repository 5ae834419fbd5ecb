//! Ordered catalog maintenance.
//!
//! [`CatalogManager`] is the single authority for position assignment:
//!
//! - `add` appends at the end when no position is given.
//! - `list` heals unassigned positions as a side effect of a full read.
//! - `reorder` rewrites positions from an id sequence, skipping unknown ids.
//! - `delete` never renumbers; gaps are expected.
//!
//! Id generation belongs to the store.

use std::sync::Arc;

use serde::Serialize;

use crate::error::CoreError;
use crate::game::{Game, GameFields};
use crate::position::Position;
use crate::store::GameStore;
use crate::types::DbId;

/// Entity name used in [`CoreError::NotFound`].
pub const ENTITY: &str = "Game";

/// Result of a reorder request.
///
/// Unknown ids are tolerated (a client may hold a stale list); they are
/// reported here instead of failing the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReorderOutcome {
    /// Number of games whose position was written.
    pub applied: usize,
    /// Ids from the request that matched no game, in request order.
    pub skipped: Vec<DbId>,
}

/// Positions to assign while scanning `games` in catalog order.
///
/// Each unassigned entry receives its zero-based index in the scan. Assigned
/// entries are left alone, so the result may collide with existing
/// positions; the id tie-break keeps the read order deterministic.
pub fn healing_assignments(games: &[Game]) -> Vec<(DbId, Position)> {
    games
        .iter()
        .enumerate()
        .filter(|(_, game)| !game.fields.sort_order.is_assigned())
        .map(|(index, game)| (game.id, Position::from_index(index)))
        .collect()
}

/// Catalog operations over a [`GameStore`].
#[derive(Clone)]
pub struct CatalogManager {
    store: Arc<dyn GameStore>,
}

impl CatalogManager {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self { store }
    }

    /// The underlying store, for health probes.
    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }

    /// Create a game. An unassigned position means "append at the end".
    pub async fn add(&self, mut fields: GameFields) -> Result<Game, CoreError> {
        fields.validate()?;

        if !fields.sort_order.is_assigned() {
            let count = self.store.count().await?;
            fields.sort_order = Position::after(count);
        }

        let game = self.store.create(&fields).await?;
        tracing::info!(game_id = game.id, sort_order = ?game.fields.sort_order, "Game created");
        Ok(game)
    }

    /// Replace every field of a game. Omitted optional fields are cleared.
    pub async fn update(&self, id: DbId, fields: GameFields) -> Result<Game, CoreError> {
        if !self.store.exists(id).await? {
            return Err(not_found(id));
        }
        fields.validate()?;

        let game = self.store.save(&Game { id, fields }).await?;
        tracing::info!(game_id = id, "Game updated");
        Ok(game)
    }

    /// Full catalog in display order, healing unassigned positions first.
    pub async fn list(&self) -> Result<Vec<Game>, CoreError> {
        let games = self.store.list_ordered().await?;
        let assignments = healing_assignments(&games);
        if assignments.is_empty() {
            return Ok(games);
        }

        for (id, position) in &assignments {
            self.store.set_position(*id, *position).await?;
        }
        tracing::info!(healed = assignments.len(), "Assigned positions to unordered games");

        self.store.list_ordered().await
    }

    pub async fn get_by_id(&self, id: DbId) -> Result<Game, CoreError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Case-insensitive title search in display order. Does not heal.
    pub async fn search(&self, query: &str) -> Result<Vec<Game>, CoreError> {
        let games = self.store.search_title(query).await?;
        tracing::debug!(query, count = games.len(), "Searched games");
        Ok(games)
    }

    /// Give each id its index in `ids` as its new position.
    ///
    /// Games not mentioned keep their position. If an id appears more than
    /// once, its last index wins.
    pub async fn reorder(&self, ids: &[DbId]) -> Result<ReorderOutcome, CoreError> {
        let mut outcome = ReorderOutcome::default();

        for (index, &id) in ids.iter().enumerate() {
            if self
                .store
                .set_position(id, Position::from_index(index))
                .await?
            {
                outcome.applied += 1;
            } else {
                tracing::debug!(game_id = id, "Skipping unknown game in reorder");
                outcome.skipped.push(id);
            }
        }

        tracing::info!(
            applied = outcome.applied,
            skipped = outcome.skipped.len(),
            "Games reordered"
        );
        Ok(outcome)
    }

    /// Remove a game and its collections. Remaining positions are untouched.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        if !self.store.exists(id).await? {
            return Err(not_found(id));
        }
        self.store.delete_by_id(id).await?;
        tracing::info!(game_id = id, "Game deleted");
        Ok(())
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
