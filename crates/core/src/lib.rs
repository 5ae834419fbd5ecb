//! Game library core.
//!
//! Domain types, the error taxonomy, the persistence seam ([`store::GameStore`])
//! and the [`catalog::CatalogManager`] that owns ordering policy. This crate has
//! no internal deps so the db and api layers can both build on it.

pub mod catalog;
pub mod error;
pub mod game;
pub mod memory;
pub mod position;
pub mod search;
pub mod store;
pub mod types;
