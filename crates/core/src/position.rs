//! Display position of a catalog entry.
//!
//! A game either has a concrete zero-based position or none at all. An
//! unassigned position is not an error state: the next full catalog read
//! assigns one (see [`crate::catalog::healing_assignments`]).
//!
//! Ordering rule: assigned positions compare numerically and
//! [`Position::Unassigned`] sorts after all of them. This matches PostgreSQL's
//! default for `ORDER BY sort_order ASC` (nulls last), so the in-memory and
//! SQL stores scan the catalog identically.

use serde::{Deserialize, Serialize};

/// Largest assignable position: the range of a signed 32-bit `INTEGER` column.
pub const MAX_POSITION: u32 = i32::MAX as u32;

/// Position of a game in the catalog's display order.
///
/// Serialized as a nullable integer in `0..=MAX_POSITION` (`null` for
/// [`Position::Unassigned`]). Values outside that range fail to deserialize.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "Option<u64>", into = "Option<u32>")]
pub enum Position {
    /// Zero-based display position. Need not be unique or contiguous.
    At(u32),
    /// No position yet; healed on the next full read.
    #[default]
    Unassigned,
}

impl Position {
    /// Position for the entry at `index` of a scan or an id sequence.
    ///
    /// Saturates at [`MAX_POSITION`].
    pub fn from_index(index: usize) -> Self {
        Self::after(u64::try_from(index).unwrap_or(u64::MAX))
    }

    /// Position for appending after `count` existing entries.
    ///
    /// Saturates at [`MAX_POSITION`].
    pub fn after(count: u64) -> Self {
        Position::At(u32::try_from(count).map_or(MAX_POSITION, |n| n.min(MAX_POSITION)))
    }

    /// `false` for an assigned position beyond [`MAX_POSITION`].
    pub fn in_range(self) -> bool {
        self.index().map_or(true, |n| n <= MAX_POSITION)
    }

    pub fn is_assigned(self) -> bool {
        matches!(self, Position::At(_))
    }

    pub fn index(self) -> Option<u32> {
        match self {
            Position::Unassigned => None,
            Position::At(n) => Some(n),
        }
    }
}

impl TryFrom<Option<u64>> for Position {
    type Error = String;

    fn try_from(value: Option<u64>) -> Result<Self, Self::Error> {
        match value {
            None => Ok(Position::Unassigned),
            Some(n) => u32::try_from(n)
                .ok()
                .filter(|&n| n <= MAX_POSITION)
                .map(Position::At)
                .ok_or_else(|| format!("sortOrder {n} out of range (max {MAX_POSITION})")),
        }
    }
}

impl From<Position> for Option<u32> {
    fn from(value: Position) -> Self {
        value.index()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
