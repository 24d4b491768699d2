//! In-memory read-through cache for single-category lookups.
//!
//! Unbounded and never expiring: entries leave only through explicit
//! invalidation. Population and invalidation are not coordinated, so a
//! lookup racing a write may re-insert a stale entry.

use std::collections::HashMap;

use catalog_core::category::CategoryDto;
use catalog_core::types::DbId;
use tokio::sync::RwLock;

/// Maps category id to the transfer object last read for it.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
#[derive(Default)]
pub struct CategoryCache {
    entries: RwLock<HashMap<DbId, CategoryDto>>,
}

impl CategoryCache {
    /// Create a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: DbId) -> Option<CategoryDto> {
        self.entries.read().await.get(&id).cloned()
    }

    pub async fn put(&self, id: DbId, dto: CategoryDto) {
        self.entries.write().await.insert(id, dto);
    }

    /// Drop the entry for one id, if any.
    pub async fn evict(&self, id: DbId) {
        self.entries.write().await.remove(&id);
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
