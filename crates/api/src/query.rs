//! Shared query parameter helpers for API handlers.
//!
//! Turns raw `?page=&size=&sort=` values into validated paging types,
//! rejecting malformed input with a 400.

use std::str::FromStr;

use catalog_core::pagination::{PageRequest, SortOrder};

use crate::error::{AppError, AppResult};

/// Build a [`PageRequest`] from `?page=&size=`. Sizes are clamped; a negative
/// page is rejected.
pub fn page_request(page: Option<i64>, size: Option<i64>) -> AppResult<PageRequest> {
    PageRequest::from_params(page, size).map_err(AppError::BadRequest)
}

/// Parse `?sort=field[,asc|desc]`, falling back to the field's default order.
pub fn sort_order<F>(raw: Option<&str>) -> AppResult<SortOrder<F>>
where
    F: FromStr<Err = String> + Default,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse().map_err(AppError::BadRequest),
        None => Ok(SortOrder::default()),
    }
}
