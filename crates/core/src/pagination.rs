//! Offset pagination and sorting primitives.
//!
//! Page numbers are zero-based. Page sizes are clamped rather than rejected;
//! malformed sort expressions are rejected with a message suitable for a
//! 400 response.

use std::str::FromStr;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page size used when the client does not send one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a requested page size into `[1, MAX_PAGE_SIZE]`.
pub fn clamp_page_size(size: Option<i64>) -> i64 {
    size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Number of pages needed to hold `total_elements` rows.
pub fn total_pages(total_elements: i64, page_size: i64) -> i64 {
    if page_size <= 0 || total_elements <= 0 {
        return 0;
    }
    (total_elements + page_size - 1) / page_size
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Which slice of a result set to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// Build a request from raw query values.
    pub fn from_params(page: Option<i64>, size: Option<i64>) -> Result<Self, String> {
        let page = page.unwrap_or(0);
        if page < 0 {
            return Err(format!("Page index must not be negative, got {page}"));
        }
        Ok(Self {
            page,
            size: clamp_page_size(size),
        })
    }

    /// Row offset of the first element on this page.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!(
                "Invalid sort direction '{other}'. Must be one of: asc, desc"
            )),
        }
    }
}

/// A sort key plus direction. `F` is an entity-specific whitelist of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> FromStr for SortOrder<F>
where
    F: FromStr<Err = String>,
{
    type Err = String;

    /// Parse `field` or `field,direction`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let field = parts.next().unwrap_or_default().trim().parse::<F>()?;
        let direction = match parts.next() {
            Some(dir) => dir.parse()?,
            None => SortDirection::default(),
        };
        Ok(Self { field, direction })
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One page of results plus the metadata a client needs to page through.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub page_number: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: i64, request: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            total_pages: total_pages(total_elements, request.size),
            page_number: request.page,
            page_size: request.size,
        }
    }

    /// Convert the content, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
