use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{CategoryCache, CategoryService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: catalog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Category operations, sharing one read cache across requests.
    pub categories: CategoryService,
}

impl AppState {
    /// Wire up state around a pool, with a fresh, empty category cache.
    pub fn new(pool: catalog_db::DbPool, config: ServerConfig) -> Self {
        let categories = CategoryService::new(pool.clone(), Arc::new(CategoryCache::new()));
        Self {
            pool,
            config: Arc::new(config),
            categories,
        }
    }
}
