//! Query parameter types for API handlers.

use serde::Deserialize;

/// Title search parameters (`?q=`).
///
/// A missing `q` is the empty query, which matches every game.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}
