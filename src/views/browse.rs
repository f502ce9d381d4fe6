use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info};

use super::state::{LoadFailure, RequestTracker, ViewState, PRODUCTS_FAILED};
use crate::browse::{BrowseQuery, PageLinks, RESET_HREF};
use crate::catalog::{Product, ProductSource};

/// Listing card; a trimmed projection of `Product`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub href: String,
}

impl From<&Product> for ProductCard {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            price: p.price,
            category: p.category.clone(),
            stock: p.stock,
            thumbnail: p.cover_image().map(str::to_string),
            rating: p.rating,
            href: format!("/products/{}", p.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowsePage {
    pub heading: String,
    pub query: BrowseQuery,
    /// Upstream order, never re-sorted here.
    pub products: Vec<ProductCard>,
    pub pagination: PageLinks,
    pub reset_href: String,
}

/// Product listing driven by a decoded `BrowseQuery`.
#[derive(Clone)]
pub struct BrowseView {
    source: Arc<dyn ProductSource>,
}

impl BrowseView {
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self { source }
    }

    /// One upstream fetch; no retry.
    pub async fn load(&self, query: &BrowseQuery) -> Result<BrowsePage, LoadFailure> {
        let page = self
            .source
            .list_products(query)
            .await
            .map_err(|e| LoadFailure::from_fetch(PRODUCTS_FAILED, query.href(), &e))?;

        info!(
            page = query.page,
            search = %query.search,
            category = %query.category,
            results = page.products.len(),
            total = ?page.total,
            "browse page loaded"
        );

        Ok(BrowsePage {
            heading: format!("Products - Page {}", query.page),
            pagination: PageLinks::render(query, page.products.len(), page.total),
            products: page.products.iter().map(ProductCard::from).collect(),
            query: query.clone(),
            reset_href: RESET_HREF.to_string(),
        })
    }
}

/// Long-lived browse view that keeps its own state and drops responses for
/// superseded navigations.
pub struct BrowseController {
    view: BrowseView,
    tracker: RequestTracker,
    state: Mutex<ViewState<BrowsePage>>,
}

impl BrowseController {
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self {
            view: BrowseView::new(source),
            tracker: RequestTracker::new(),
            state: Mutex::new(ViewState::Idle),
        }
    }

    /// Returns false when a newer navigation superseded this one.
    pub async fn navigate(&self, query: BrowseQuery) -> bool {
        let ticket = self.tracker.issue();
        self.set(ViewState::Loading);

        let result = self.view.load(&query).await;
        if !self.tracker.is_current(ticket) {
            debug!(generation = ticket.generation(), "discarding stale browse response");
            return false;
        }
        self.set(result.into());
        true
    }

    /// Decode a raw query string and navigate to it.
    pub async fn navigate_raw(&self, raw_query: &str) -> bool {
        self.navigate(BrowseQuery::decode(raw_query)).await
    }

    pub fn state(&self) -> ViewState<BrowsePage> {
        self.state
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn set(&self, next: ViewState<BrowsePage>) {
        let mut guard = self.state.lock().unwrap_or_else(|p| p.into_inner());
        *guard = next;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::browse::{SortBy, SortOrder};
    use crate::catalog::stub::{product, StubSource};
    use crate::catalog::{Category, FetchError, ProductPage};

    #[tokio::test]
    async fn full_page_offers_next() {
        let source = Arc::new(StubSource::with_products(20));
        let view = BrowseView::new(source.clone());
        let page = view.load(&BrowseQuery::decode("page=2&search=x")).await.unwrap();

        assert_eq!(page.heading, "Products - Page 2");
        assert_eq!(page.products.len(), 20);
        assert_eq!(page.pagination.previous.as_deref(), Some("/products?search=x"));
        assert_eq!(page.pagination.next.as_deref(), Some("/products?page=3&search=x"));
        assert_eq!(page.reset_href, "/products");
    }

    #[tokio::test]
    async fn short_page_is_terminal_and_keeps_upstream_order() {
        let mut source = StubSource::with_products(0);
        source.products = vec![product(9), product(2), product(5)];
        let view = BrowseView::new(Arc::new(source));
        let page = view.load(&BrowseQuery::default()).await.unwrap();

        let ids: Vec<u64> = page.products.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![9, 2, 5]);
        assert!(page.pagination.next.is_none());
        assert!(page.pagination.previous.is_none());
        assert_eq!(page.products[0].href, "/products/9");
    }

    #[tokio::test]
    async fn passes_decoded_query_to_source_once() {
        let source = Arc::new(StubSource::with_products(3));
        let view = BrowseView::new(source.clone());
        let query = BrowseQuery::decode("category=tops&sortBy=price&order=asc");
        view.load(&query).await.unwrap();

        let seen = source.seen_queries.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].sort_by, SortBy::Price);
        assert_eq!(seen[0].order, SortOrder::Asc);
    }

    #[tokio::test]
    async fn upstream_failure_is_caught() {
        let view = BrowseView::new(Arc::new(StubSource::failing(503)));
        let failure = view
            .load(&BrowseQuery::decode("page=3&search=lamp"))
            .await
            .unwrap_err();
        assert_eq!(failure.message, PRODUCTS_FAILED);
        assert_eq!(failure.retry_href, "/products?page=3&search=lamp");
    }

    /// Holds page 1 longer than page 2 so responses arrive out of order.
    struct SlowFirstPage;

    #[async_trait]
    impl ProductSource for SlowFirstPage {
        async fn list_products(&self, query: &BrowseQuery) -> Result<ProductPage, FetchError> {
            if query.page == 1 {
                tokio::time::sleep(Duration::from_millis(60)).await;
            }
            Ok(ProductPage {
                products: vec![product(u64::from(query.page))],
                total: None,
            })
        }

        async fn get_product(&self, id: u64) -> Result<crate::catalog::Product, FetchError> {
            Ok(product(id))
        }

        async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let controller = BrowseController::new(Arc::new(SlowFirstPage));
        let (first, second) = tokio::join!(
            controller.navigate_raw("page=1"),
            controller.navigate_raw("page=2"),
        );
        assert!(!first);
        assert!(second);

        let state = controller.state();
        let page = state.loaded().expect("page 2 should be loaded");
        assert_eq!(page.query.page, 2);
        assert_eq!(page.products[0].id, 2);
    }

    #[tokio::test]
    async fn controller_records_failure() {
        let controller = BrowseController::new(Arc::new(StubSource::failing(500)));
        assert!(matches!(controller.state(), ViewState::Idle));
        assert!(controller.navigate(BrowseQuery::default()).await);
        assert!(controller.state().failure().is_some());
    }
}
