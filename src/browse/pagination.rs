use serde::Serialize;

use super::query::{BrowseOverrides, BrowseQuery};

/// Items requested per listing fetch.
pub const PAGE_SIZE: usize = 20;

/// Previous/next navigation for one rendered listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub current: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PageLinks {
    /// Build links for `query` after a fetch returned `result_count` items.
    ///
    /// A short page is always terminal. A full page means "more data likely
    /// exists" unless an upstream `total` says this page reaches the end.
    pub fn render(query: &BrowseQuery, result_count: usize, total: Option<u64>) -> Self {
        let current = query.page.max(1);
        let previous =
            (current > 1).then(|| query.href_with(&BrowseOverrides::page(current - 1)));
        let next = current
            .checked_add(1)
            .filter(|_| has_more(current, result_count, total))
            .map(|page| query.href_with(&BrowseOverrides::page(page)));
        Self {
            current,
            previous,
            next,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}

pub fn has_more(page: u32, result_count: usize, total: Option<u64>) -> bool {
    result_count == PAGE_SIZE
        && total.map_or(true, |total| u64::from(page.max(1)) * (PAGE_SIZE as u64) < total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::query::{SortBy, SortOrder};

    fn query(page: u32) -> BrowseQuery {
        BrowseQuery {
            page,
            search: "phone".into(),
            category: "smartphones".into(),
            sort_by: SortBy::Price,
            order: SortOrder::Desc,
        }
    }

    #[test]
    fn next_only_on_full_page() {
        assert!(PageLinks::render(&query(1), 20, None).next.is_some());
        for short in [0, 1, 19] {
            let links = PageLinks::render(&query(1), short, None);
            assert!(links.next.is_none(), "count {short}");
            assert!(links.is_terminal());
        }
    }

    #[test]
    fn previous_only_after_first_page() {
        assert!(PageLinks::render(&query(1), 20, None).previous.is_none());
        assert!(PageLinks::render(&query(2), 20, None).previous.is_some());
    }

    #[test]
    fn links_keep_filters_and_move_page() {
        let links = PageLinks::render(&query(2), 20, None);
        assert_eq!(
            links.previous.as_deref(),
            Some("/products?search=phone&category=smartphones&sortBy=price&order=desc")
        );
        assert_eq!(
            links.next.as_deref(),
            Some("/products?page=3&search=phone&category=smartphones&sortBy=price&order=desc")
        );
        assert_eq!(links.current, 2);
    }

    #[test]
    fn total_only_narrows_full_page_heuristic() {
        // Exactly 40 items: page 2 is full but nothing follows.
        assert!(PageLinks::render(&query(2), 20, Some(40)).next.is_none());
        assert!(PageLinks::render(&query(2), 20, Some(41)).next.is_some());
        // A short page stays terminal whatever the upstream total claims.
        assert!(PageLinks::render(&BrowseQuery::default(), 5, Some(194)).next.is_none());
        assert!(PageLinks::render(&query(1), 19, Some(194)).is_terminal());
    }

    #[test]
    fn last_representable_page_has_no_next() {
        let query = BrowseQuery::decode("page=4294967295");
        assert_eq!(query.page, u32::MAX);
        let links = PageLinks::render(&query, 20, None);
        assert!(links.next.is_none());
        assert_eq!(links.current, u32::MAX);
        assert_eq!(
            links.previous.as_deref(),
            Some("/products?page=4294967294")
        );
    }
}
