//! Category operations: one explicit transaction per call, read-through
//! caching of single lookups, and translation of store failures into
//! domain errors.

use std::sync::Arc;

use catalog_core::category::{
    validate_category, CategoryDto, CategoryName, ENTITY_NAME, FIELD_NAME, MSG_NAME_TAKEN,
};
use catalog_core::error::{CoreError, FieldError};
use catalog_core::pagination::{Page, PageRequest};
use catalog_core::types::DbId;
use catalog_db::error::{classify, StoreFailure};
use catalog_db::models::category::CategorySort;
use catalog_db::repositories::CategoryRepo;
use catalog_db::DbPool;
use sqlx::{Postgres, Transaction};

use crate::error::{AppError, AppResult};
use crate::services::CategoryCache;

/// Cheap to clone; clones share the pool and the cache.
#[derive(Clone)]
pub struct CategoryService {
    pool: DbPool,
    cache: Arc<CategoryCache>,
}

impl CategoryService {
    pub fn new(pool: DbPool, cache: Arc<CategoryCache>) -> Self {
        Self { pool, cache }
    }

    pub fn cache(&self) -> &CategoryCache {
        &self.cache
    }

    /// List one page of categories, filtered by a case-insensitive name
    /// substring when `name_filter` is non-empty.
    pub async fn find_all(
        &self,
        name_filter: Option<&str>,
        page: PageRequest,
        sort: CategorySort,
    ) -> AppResult<Page<CategoryDto>> {
        let mut tx = self.begin_read_only().await?;
        let (rows, total) = CategoryRepo::find_all(&mut *tx, name_filter, page, sort).await?;
        tx.commit().await?;

        Ok(Page::new(rows, total, page).map(CategoryDto::from))
    }

    /// Look up one category, serving repeat lookups from the cache.
    pub async fn find_by_id(&self, id: DbId) -> AppResult<CategoryDto> {
        if let Some(hit) = self.cache.get(id).await {
            tracing::debug!(category_id = id, "Category cache hit");
            return Ok(hit);
        }
        tracing::debug!(category_id = id, "Category cache miss");

        let mut tx = self.begin_read_only().await?;
        let row = CategoryRepo::find_by_id(&mut *tx, id).await?;
        tx.commit().await?;

        let dto = row.map(CategoryDto::from).ok_or_else(|| not_found(id))?;
        self.cache.put(id, dto.clone()).await;
        Ok(dto)
    }

    /// Apply the field rules and the case-insensitive uniqueness rule to an
    /// inbound category, collecting every violation.
    ///
    /// Uniqueness is checked against all rows, including the one being
    /// updated, so renaming a category to its current name is rejected.
    pub async fn validate(&self, dto: &CategoryDto) -> AppResult<()> {
        let mut errors = validate_category(dto);

        let trimmed = dto.name.trim();
        if !trimmed.is_empty() {
            let mut conn = self.pool.acquire().await?;
            if CategoryRepo::exists_by_name_ignore_case(&mut *conn, trimmed).await? {
                errors.push(FieldError::new(FIELD_NAME, MSG_NAME_TAKEN));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(errors).into())
        }
    }

    /// Create a category. Any supplied id is ignored.
    ///
    /// Flushes the whole cache on success.
    pub async fn create(&self, dto: &CategoryDto) -> AppResult<CategoryDto> {
        let name = CategoryName::parse(&dto.name)?;
        tracing::info!(name = %name, "Creating category");

        let mut tx = self.pool.begin().await?;
        let row = CategoryRepo::insert(&mut *tx, &name)
            .await
            .map_err(translate_store_error)?;
        tx.commit().await.map_err(translate_store_error)?;

        self.cache.clear().await;
        tracing::info!(category_id = row.id, name = %row.name, "Category created");

        Ok(row.into())
    }

    /// Rename an existing category. Evicts its cache entry on success.
    pub async fn update(&self, id: DbId, dto: &CategoryDto) -> AppResult<CategoryDto> {
        let name = CategoryName::parse(&dto.name)?;

        let mut tx = self.pool.begin().await?;
        if CategoryRepo::find_by_id_for_update(&mut *tx, id)
            .await?
            .is_none()
        {
            return Err(not_found(id));
        }
        let row = CategoryRepo::update_name(&mut *tx, id, &name)
            .await
            .map_err(translate_store_error)?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await.map_err(translate_store_error)?;

        self.cache.evict(id).await;
        tracing::info!(category_id = id, name = %row.name, "Category updated");

        Ok(row.into())
    }

    /// Delete a category. Evicts its cache entry on success.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let deleted = CategoryRepo::delete_by_id(&mut *tx, id)
            .await
            .map_err(translate_store_error)?;
        if !deleted {
            return Err(not_found(id));
        }
        tx.commit().await.map_err(translate_store_error)?;

        self.cache.evict(id).await;
        tracing::info!(category_id = id, "Category deleted");

        Ok(())
    }

    async fn begin_read_only(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_NAME,
        id,
    })
}

/// Constraint breaches become [`CoreError::IntegrityViolation`]; everything
/// else stays an unclassified database error.
fn translate_store_error(err: sqlx::Error) -> AppError {
    match classify(&err) {
        failure @ StoreFailure::IntegrityViolation { .. } => {
            let message = failure.describe();
            tracing::warn!(error = %err, "Category write rejected by constraint");
            AppError::Core(CoreError::IntegrityViolation(message))
        }
        _ => AppError::Database(err),
    }
}
