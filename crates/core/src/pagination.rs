//! Page-number pagination for the HTML list.

/// Rows per page on the track list page.
pub const WEB_PAGE_SIZE: i64 = 25;

/// A resolved page within a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: i64,
    pub total_pages: i64,
    pub per_page: i64,
    pub total_items: i64,
}

impl Page {
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Resolve a `?page=` value against a result set of `total_items`.
///
/// Accepts a positive integer or `last`; absent means page 1. An empty result
/// set still has one (empty) page. Returns `None` for anything else,
/// including numbers past the last page.
pub fn resolve_page(raw: Option<&str>, total_items: i64, per_page: i64) -> Option<Page> {
    let per_page = per_page.max(1);
    let total_pages = ((total_items + per_page - 1) / per_page).max(1);

    let number = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => 1,
        Some("last") => total_pages,
        Some(value) => value.parse::<i64>().ok()?,
    };

    if !(1..=total_pages).contains(&number) {
        return None;
    }

    Some(Page {
        number,
        total_pages,
        per_page,
        total_items,
    })
}
