//! In-memory [`GameStore`], used by tests and `STORE_BACKEND=memory`.
//!
//! Mirrors the PostgreSQL schema's behaviour: ids come from a monotonically
//! increasing counter starting at 1, titles are unique (exact match), and
//! reads come back in catalog order.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::ENTITY;
use crate::error::CoreError;
use crate::game::{catalog_order, Game, GameFields};
use crate::position::Position;
use crate::search::title_matches;
use crate::store::GameStore;
use crate::types::DbId;

/// Name reported in conflict messages, matching the SQL constraint.
const TITLE_CONSTRAINT: &str = "uq_games_title";

#[derive(Debug)]
struct Inner {
    next_id: DbId,
    games: BTreeMap<DbId, Game>,
}

impl Inner {
    fn title_taken(&self, title: &str, except: Option<DbId>) -> bool {
        self.games
            .values()
            .any(|g| g.fields.title == title && Some(g.id) != except)
    }

    fn sorted(&self, mut keep: impl FnMut(&Game) -> bool) -> Vec<Game> {
        let mut games: Vec<Game> = self.games.values().filter(|g| keep(g)).cloned().collect();
        games.sort_by(catalog_order);
        games
    }
}

/// Thread-safe game store backed by a `BTreeMap` behind a `tokio` `RwLock`.
#[derive(Debug)]
pub struct InMemoryGameStore {
    inner: RwLock<Inner>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                games: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryGameStore {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate_title() -> CoreError {
    CoreError::Conflict(format!(
        "Duplicate value violates unique constraint: {TITLE_CONSTRAINT}"
    ))
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn create(&self, fields: &GameFields) -> Result<Game, CoreError> {
        let mut inner = self.inner.write().await;
        if inner.title_taken(&fields.title, None) {
            return Err(duplicate_title());
        }

        let id = inner.next_id;
        inner.next_id += 1;
        let game = Game {
            id,
            fields: fields.clone(),
        };
        inner.games.insert(id, game.clone());
        Ok(game)
    }

    async fn save(&self, game: &Game) -> Result<Game, CoreError> {
        let mut inner = self.inner.write().await;
        if !inner.games.contains_key(&game.id) {
            return Err(CoreError::NotFound {
                entity: ENTITY,
                id: game.id,
            });
        }
        if inner.title_taken(&game.fields.title, Some(game.id)) {
            return Err(duplicate_title());
        }

        inner.games.insert(game.id, game.clone());
        Ok(game.clone())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Game>, CoreError> {
        Ok(self.inner.read().await.games.get(&id).cloned())
    }

    async fn exists(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.inner.read().await.games.contains_key(&id))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), CoreError> {
        self.inner.write().await.games.remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<u64, CoreError> {
        Ok(self.inner.read().await.games.len() as u64)
    }

    async fn set_position(&self, id: DbId, position: Position) -> Result<bool, CoreError> {
        let mut inner = self.inner.write().await;
        match inner.games.get_mut(&id) {
            Some(game) => {
                game.fields.sort_order = position;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_ordered(&self) -> Result<Vec<Game>, CoreError> {
        Ok(self.inner.read().await.sorted(|_| true))
    }

    async fn search_title(&self, query: &str) -> Result<Vec<Game>, CoreError> {
        Ok(self
            .inner
            .read()
            .await
            .sorted(|g| title_matches(&g.fields.title, query)))
    }

    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
