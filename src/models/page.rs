use serde::{Deserialize, Serialize};

/// Upper bound on the page count the upstream API will serve
pub const MAX_PAGES: u32 = 500;

/// One page of a paginated listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    pub total_results: u64,
}

impl<T> Page<T> {
    /// Builds a page, clamping the reported page count to [`MAX_PAGES`]
    pub fn new(page: u32, results: Vec<T>, total_pages: u32, total_results: u64) -> Self {
        Self {
            page,
            results,
            total_pages: total_pages.min(MAX_PAGES),
            total_results,
        }
    }

    /// A listing that fits on one page
    pub fn single(results: Vec<T>) -> Self {
        let total_results = results.len() as u64;
        Self::new(1, results, 1, total_results)
    }
}

/// Entry of a pagination control
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type", content = "page")]
pub enum PageLink {
    Number(u32),
    Gap,
}

/// Page links around `current`: two pages either side, plus the first and last
/// page with a gap marker when pages are skipped.
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let current = current.clamp(1, total_pages);
    let start = current.saturating_sub(2).max(1);
    let end = (current + 2).min(total_pages);

    let mut links = Vec::new();
    if start > 1 {
        links.push(PageLink::Number(1));
        if start > 2 {
            links.push(PageLink::Gap);
        }
    }

    links.extend((start..=end).map(PageLink::Number));

    if end < total_pages {
        if end < total_pages - 1 {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Number(total_pages));
    }

    links
}
