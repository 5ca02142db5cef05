//! Pagination DTOs
//!
//! `PageQuery` carries the caller's paging intent plus an optional condition
//! payload; `PagedData` carries one page of results. Both clamp their numbers
//! instead of failing: page numbers below 1 become 1, page sizes are bounded
//! to a sane window.

use serde::{Deserialize, Serialize};

/// First page number; paging is 1-based.
pub const DEFAULT_PAGE_NUM: u32 = 1;
/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Smallest accepted page size.
pub const MIN_PAGE_SIZE: u32 = 1;
/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Paged query envelope.
///
/// `sort` holds a `"field,desc;other,asc"` style instruction. It must never
/// be interpolated into SQL without passing
/// [`is_sort_allowed`](Self::is_sort_allowed) against an allow-list first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery<C> {
    /// Requested page, 1-based.
    pub page_num: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Query condition payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<C>,
    /// Sort instruction, e.g. `"created_at,desc;name,asc"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl<C> Default for PageQuery<C> {
    fn default() -> Self {
        Self {
            page_num: DEFAULT_PAGE_NUM,
            page_size: DEFAULT_PAGE_SIZE,
            condition: None,
            sort: None,
        }
    }
}

impl<C> PageQuery<C> {
    /// First page with the default size and the given condition.
    pub fn new(condition: C) -> Self {
        Self { condition: Some(condition), ..Self::default() }
    }

    /// Explicit paging with a condition.
    pub fn with_paging(page_num: u32, page_size: u32, condition: C) -> Self {
        Self { page_num, page_size, condition: Some(condition), sort: None }
    }

    /// Effective page number, never below 1.
    pub fn page(&self) -> u32 {
        self.page_num.max(DEFAULT_PAGE_NUM)
    }

    /// Effective page size, clamped to `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`.
    pub fn size(&self) -> u32 {
        self.page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
    }

    /// Row offset for the effective page and size.
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.size())
    }

    /// Check every sort field against an allow-list.
    ///
    /// Returns `true` when there is no sort instruction, or when every
    /// `field,direction` segment names an allowed field. An empty segment or
    /// unknown field fails the check.
    pub fn is_sort_allowed(&self, allowed_fields: &[&str]) -> bool {
        let Some(sort) = self.sort.as_deref() else {
            return true;
        };
        if sort.trim().is_empty() {
            return true;
        }
        sort.split(';').filter(|segment| !segment.trim().is_empty()).all(|segment| {
            let field = segment.split(',').next().unwrap_or("").trim();
            !field.is_empty() && allowed_fields.contains(&field)
        })
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedData<T> {
    /// Total number of matching records across all pages.
    pub total: u64,
    /// Page these records belong to, 1-based.
    pub page_num: u32,
    /// Page size used for the query.
    pub page_size: u32,
    /// The records themselves.
    pub records: Vec<T>,
    /// Optional extension data riding along with the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl<T> PagedData<T> {
    /// Assemble a page, clamping the paging numbers the same way
    /// [`PageQuery`] does.
    pub fn new(page_num: u32, page_size: u32, total: u64, records: Vec<T>) -> Self {
        Self {
            total,
            page_num: page_num.max(DEFAULT_PAGE_NUM),
            page_size: page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE),
            records,
            metadata: None,
        }
    }

    /// Assemble a page for the paging carried by `query`.
    pub fn from_query<C>(query: &PageQuery<C>, total: u64, records: Vec<T>) -> Self {
        Self::new(query.page(), query.size(), total, records)
    }

    /// An empty first page.
    pub fn empty() -> Self {
        Self::new(DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE, 0, Vec::new())
    }

    /// Attach one metadata entry, creating the map on first use.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.get_or_insert_with(serde_json::Map::new).insert(key.into(), value);
        self
    }

    /// Number of pages needed for `total` records at this page size.
    pub fn total_pages(&self) -> u64 {
        let size = u64::from(self.page_size);
        self.total.div_ceil(size)
    }
}
