//! Repository for the `categories` table.

use catalog_core::category::CategoryName;
use catalog_core::pagination::PageRequest;
use catalog_core::types::DbId;
use sqlx::PgConnection;

use crate::models::category::{Category, CategorySort, CategorySortField};

/// Column list for categories queries.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides query and CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Find a category by its ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find a category by ID and lock its row until the transaction ends.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List one page of categories, optionally filtered by a case-insensitive
    /// substring of the name.
    ///
    /// Returns the page rows and the total number of rows matching the filter.
    pub async fn find_all(
        conn: &mut PgConnection,
        name_filter: Option<&str>,
        page: PageRequest,
        sort: CategorySort,
    ) -> Result<(Vec<Category>, i64), sqlx::Error> {
        let pattern = name_filter.filter(|f| !f.is_empty()).map(like_pattern);

        let mut bind_idx = 1u32;
        let where_clause = if pattern.is_some() {
            bind_idx += 1;
            "WHERE name ILIKE $1 ESCAPE '\\'"
        } else {
            ""
        };

        let count_query = format!("SELECT COUNT(*) FROM categories {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref pattern) = pattern {
            count = count.bind(pattern);
        }
        let total = count.fetch_one(&mut *conn).await?;

        let direction = sort.direction.as_sql();
        let order_by = if sort.field == CategorySortField::Id {
            format!("id {direction}")
        } else {
            format!("{} {direction}, id ASC", sort.field.column())
        };

        let query = format!(
            "SELECT {COLUMNS} FROM categories {where_clause} \
             ORDER BY {order_by} \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );
        let mut q = sqlx::query_as::<_, Category>(&query);
        if let Some(ref pattern) = pattern {
            q = q.bind(pattern);
        }
        let rows = q
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(&mut *conn)
            .await?;

        Ok((rows, total))
    }

    /// Whether any category already uses `name`, ignoring case.
    pub async fn exists_by_name_ignore_case(
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE LOWER(name) = LOWER($1))",
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await
    }

    /// Insert a new category, returning the created row.
    ///
    /// Fails with a unique violation on `uq_categories_name_lower` if the
    /// name is already taken.
    pub async fn insert(
        conn: &mut PgConnection,
        name: &CategoryName,
    ) -> Result<Category, sqlx::Error> {
        let query = format!("INSERT INTO categories (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(name.as_str())
            .fetch_one(&mut *conn)
            .await
    }

    /// Rename a category and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_name(
        conn: &mut PgConnection,
        id: DbId,
        name: &CategoryName,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET name = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(name.as_str())
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was deleted.
    pub async fn delete_by_id(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Turn a user-supplied filter into an `ILIKE` substring pattern, escaping
/// the wildcard characters so they match literally.
pub fn like_pattern(filter: &str) -> String {
    let mut escaped = String::with_capacity(filter.len() + 2);
    escaped.push('%');
    for c in filter.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_filter_is_wrapped() {
        assert_eq!(like_pattern("fic"), "%fic%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn backslash_is_escaped() {
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
