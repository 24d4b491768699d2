//! Category model.

use std::str::FromStr;

use catalog_core::category::CategoryDto;
use catalog_core::pagination::SortOrder;
use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Timestamps stay behind; only id and name cross the service boundary.
impl From<Category> for CategoryDto {
    fn from(row: Category) -> Self {
        CategoryDto::new(row.id, row.name)
    }
}

/// Columns a category listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySortField {
    #[default]
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

impl CategorySortField {
    pub fn column(self) -> &'static str {
        match self {
            CategorySortField::Id => "id",
            CategorySortField::Name => "name",
            CategorySortField::CreatedAt => "created_at",
            CategorySortField::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for CategorySortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(CategorySortField::Id),
            "name" => Ok(CategorySortField::Name),
            "createdAt" | "created_at" => Ok(CategorySortField::CreatedAt),
            "updatedAt" | "updated_at" => Ok(CategorySortField::UpdatedAt),
            other => Err(format!(
                "Invalid sort field '{other}'. Must be one of: id, name, createdAt, updatedAt"
            )),
        }
    }
}

pub type CategorySort = SortOrder<CategorySortField>;
