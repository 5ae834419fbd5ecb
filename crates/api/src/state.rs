use std::sync::Arc;

use gamelib_core::catalog::CatalogManager;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog manager over the configured game store.
    pub catalog: CatalogManager,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
