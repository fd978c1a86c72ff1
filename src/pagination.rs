//! Page window arithmetic shared by every paged listing.
//!
//! [`compute_window`] is the only place where offsets, page lists and the
//! visible page range are derived. Listings never re-derive this math; they
//! count their rows, ask for a window and fetch the slice described by it.

use std::num::IntErrorKind;

use serde::Serialize;

/// Number of page buttons shown on each side of the current page.
pub const WINDOW_RADIUS: i64 = 5;

/// Page requested by the caller together with the listing's fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }
}

/// Normalizes a raw `page` parameter taken from a query string.
///
/// Missing, blank and unparseable values fall back to the first page. Values
/// that parse are returned as is, even when zero or negative. Integers too
/// large for `i64` saturate, so a huge page stays past the end.
pub fn parse_page(raw: Option<&str>) -> i64 {
    let Some(value) = raw.map(str::trim) else {
        return 1;
    };

    match value.parse::<i64>() {
        Ok(page) => page,
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 1,
        },
    }
}

/// Windowing description for one page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationWindow {
    /// Zero-based row offset, `(page - 1) * limit`. Not clamped.
    #[serde(skip)]
    pub offset: i64,
    pub pages: Vec<i64>,
    pub visible_pages: Vec<i64>,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

/// Computes the page window for `page` over `total` rows split into pages of
/// `limit` rows.
///
/// Never fails: a `limit` below one is treated as one and a negative `total`
/// as zero. `page` is taken verbatim, so the offset can be negative or point
/// past the last row.
pub fn compute_window(page: i64, limit: i64, total: i64) -> PaginationWindow {
    let limit = limit.max(1);
    let total = total.max(0);

    let page_count = total / limit + i64::from(total % limit != 0);
    let pages: Vec<i64> = (1..=page_count).collect();

    let offset = page.saturating_sub(1).saturating_mul(limit);

    let start_page = page.saturating_sub(WINDOW_RADIUS).max(1);
    let end_page = page.saturating_add(WINDOW_RADIUS).min(page_count);
    let visible_pages = if start_page <= end_page {
        (start_page..=end_page).collect()
    } else {
        Vec::new()
    };

    PaginationWindow {
        offset,
        pages,
        visible_pages,
        has_previous_page: page > 1,
        has_next_page: page < page_count,
    }
}

/// One page of rows plus the window needed to render a page selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub rows: Vec<T>,
    pub total_records: i64,
    #[serde(flatten)]
    pub window: PaginationWindow,
}

impl<T> Paged<T> {
    pub fn new(rows: Vec<T>, total_records: i64, window: PaginationWindow) -> Self {
        Self {
            rows,
            total_records,
            window,
        }
    }

    /// True when the requested page has no rows, either because nothing
    /// matches the filter or because the page lies past the end.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> Paged<U>
    where
        F: FnMut(T) -> U,
    {
        Paged {
            rows: self.rows.into_iter().map(f).collect(),
            total_records: self.total_records,
            window: self.window,
        }
    }
}
