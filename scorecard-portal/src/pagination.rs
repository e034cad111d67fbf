//! Pagination utilities for the JSON API

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Index of the first item on this page
    pub offset: usize,
    /// Items per page
    pub page_size: usize,
}

impl Pagination {
    /// Slice of `items` that falls on this page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]
///
/// # Arguments
/// * `total_results` - Total number of items in result set
/// * `requested_page` - Page number requested by user (may be out of bounds)
/// * `page_size` - Items per page (zero is treated as one)
///
/// # Examples
/// ```
/// use scorecard_portal::pagination::calculate_pagination;
///
/// // 250 total results = 3 pages (100 + 100 + 50)
/// let p = calculate_pagination(250, 2, 100);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 100);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(250, 99, 100);
/// assert_eq!(p.page, 3);  // Clamped to last page
/// assert_eq!(p.offset, 200);
/// ```
pub fn calculate_pagination(
    total_results: usize,
    requested_page: usize,
    page_size: usize,
) -> Pagination {
    let page_size = page_size.max(1);
    let total_pages = total_results.div_ceil(page_size);
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * page_size;

    Pagination {
        page,
        total_pages,
        offset,
        page_size,
    }
}
