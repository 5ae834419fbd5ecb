//! Game row model.
//!
//! The `games` row holds scalar fields only. Genres, platforms and
//! screenshots live in their own tables, one row per item, ordered by a
//! `position` column.

use std::collections::HashMap;

use gamelib_core::error::CoreError;
use gamelib_core::game::{Game, GameFields};
use gamelib_core::position::Position;
use gamelib_core::types::{DbId, ReleaseDate};
use sqlx::FromRow;

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow)]
pub struct GameRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub release_date: Option<ReleaseDate>,
    pub rating: Option<f64>,
    pub cover_image_url: Option<String>,
    pub banner_image_url: Option<String>,
    pub trailer_url: Option<String>,
    pub more_info_url: Option<String>,
    pub sort_order: Option<i32>,
}

/// The three ordered string collections attached to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Genres,
    Platforms,
    Screenshots,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Genres,
        Collection::Platforms,
        Collection::Screenshots,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Collection::Genres => "game_genres",
            Collection::Platforms => "game_platforms",
            Collection::Screenshots => "game_screenshots",
        }
    }

    pub fn value_column(self) -> &'static str {
        match self {
            Collection::Genres => "genre",
            Collection::Platforms => "platform",
            Collection::Screenshots => "screenshot_url",
        }
    }

    /// The items of this collection in `fields`.
    pub fn items(self, fields: &GameFields) -> &[String] {
        match self {
            Collection::Genres => &fields.genres,
            Collection::Platforms => &fields.platforms,
            Collection::Screenshots => &fields.screenshots,
        }
    }
}

/// Collection items keyed by game id, each list in stored order.
pub type CollectionItems = HashMap<DbId, Vec<String>>;

impl GameRow {
    /// Assemble a domain [`Game`] from this row and its collections.
    ///
    /// Negative stored positions cannot occur (CHECK constraint); if one did,
    /// it would read as unassigned and be healed.
    pub fn into_game(
        self,
        genres: Vec<String>,
        platforms: Vec<String>,
        screenshots: Vec<String>,
    ) -> Game {
        Game {
            id: self.id,
            fields: GameFields {
                title: self.title,
                description: self.description,
                release_date: self.release_date,
                rating: self.rating,
                genres,
                platforms,
                cover_image_url: self.cover_image_url,
                banner_image_url: self.banner_image_url,
                trailer_url: self.trailer_url,
                more_info_url: self.more_info_url,
                screenshots,
                sort_order: position_from_column(self.sort_order),
            },
        }
    }
}

/// Read a nullable `sort_order` column.
pub fn position_from_column(value: Option<i32>) -> Position {
    value
        .and_then(|v| u32::try_from(v).ok())
        .map_or(Position::Unassigned, Position::At)
}

/// Convert a position for the nullable `INTEGER` column.
pub fn position_to_column(position: Position) -> Result<Option<i32>, CoreError> {
    position
        .index()
        .map(i32::try_from)
        .transpose()
        .map_err(|_| {
            CoreError::Validation(format!(
                "sortOrder out of range (max {})",
                i32::MAX
            ))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
