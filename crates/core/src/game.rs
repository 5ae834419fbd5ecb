//! Game entity and its input field set.
//!
//! Wire names are camelCase (`releaseDate`, `coverImageUrl`, `sortOrder`, ...)
//! to match the browser client.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::position::{Position, MAX_POSITION};
use crate::types::{DbId, ReleaseDate};

/// Maximum length of a title in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// A stored catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: DbId,
    #[serde(flatten)]
    pub fields: GameFields,
}

/// Every field of a [`Game`] except its id.
///
/// Used as the full replacement set for create and update. Omitted optional
/// fields deserialize to `None`, omitted or `null` lists to empty, and an
/// omitted `sortOrder` to [`Position::Unassigned`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_date: Option<ReleaseDate>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub more_info_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub sort_order: Position,
}

impl GameFields {
    /// Shorthand for a field set with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Same field set with a different position.
    pub fn at(mut self, sort_order: Position) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Check the invariants the store cannot express on its own.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation(
                "Game title must not be empty".to_string(),
            ));
        }
        let len = self.title.chars().count();
        if len > MAX_TITLE_LEN {
            return Err(CoreError::Validation(format!(
                "Game title too long: {len} chars (max {MAX_TITLE_LEN})"
            )));
        }
        if let Some(rating) = self.rating {
            if !rating.is_finite() {
                return Err(CoreError::Validation(
                    "Game rating must be a finite number".to_string(),
                ));
            }
        }
        if !self.sort_order.in_range() {
            return Err(CoreError::Validation(format!(
                "sortOrder out of range (max {MAX_POSITION})"
            )));
        }
        Ok(())
    }
}

/// Catalog display order: position ascending (unassigned last), then id.
pub fn catalog_order(a: &Game, b: &Game) -> Ordering {
    (a.fields.sort_order, a.id).cmp(&(b.fields.sort_order, b.id))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
