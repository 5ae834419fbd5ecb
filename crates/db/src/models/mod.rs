//! Row models.
//!
//! Each submodule contains a `FromRow` struct matching the database row and
//! the conversions between it and the core domain types.

pub mod game;
