use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info};

use super::gallery::Gallery;
use super::reviews::ReviewSort;
use super::state::{LoadFailure, RequestTracker, ViewState, PRODUCT_FAILED};
use crate::catalog::{Product, ProductSource, Review};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    pub tags: Vec<String>,
    pub gallery: Gallery,
    pub review_sort: ReviewSort,
    pub reviews: Vec<ReviewView>,
    pub back_href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub reviewer_name: String,
    pub date: String,
    pub comment: String,
    pub rating: u8,
    pub filled_stars: u8,
}

impl From<&Review> for ReviewView {
    fn from(r: &Review) -> Self {
        Self {
            reviewer_name: r.reviewer_name.clone(),
            date: r.date.format("%Y-%m-%d").to_string(),
            comment: r.comment.clone(),
            rating: r.rating,
            filled_stars: r.filled_stars(),
        }
    }
}

impl ProductDetail {
    pub fn build(product: Product, sort: ReviewSort, image_index: usize) -> Self {
        let reviews = sort.apply(&product.reviews).iter().map(ReviewView::from).collect();
        let tags = product.tag_set().into_iter().map(str::to_string).collect();
        Self {
            id: product.id,
            in_stock: product.stock > 0,
            gallery: Gallery::new(product.images, image_index),
            title: product.title,
            description: product.description,
            price: product.price,
            category: product.category,
            stock: product.stock,
            brand: product.brand,
            rating: product.rating,
            discount_percentage: product.discount_percentage,
            tags,
            review_sort: sort,
            reviews,
            back_href: "/products".to_string(),
        }
    }
}

/// Single product page: gallery plus sorted reviews.
#[derive(Clone)]
pub struct DetailView {
    source: Arc<dyn ProductSource>,
}

impl DetailView {
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self { source }
    }

    pub async fn load(
        &self,
        id: u64,
        sort: ReviewSort,
        image_index: usize,
    ) -> Result<ProductDetail, LoadFailure> {
        let product = self.fetch(id).await?;
        Ok(ProductDetail::build(product, sort, image_index))
    }

    /// The raw product behind `load`, with the same failure mapping.
    pub async fn fetch(&self, id: u64) -> Result<Product, LoadFailure> {
        let product = self
            .source
            .get_product(id)
            .await
            .map_err(|e| LoadFailure::from_fetch(PRODUCT_FAILED, format!("/products/{id}"), &e))?;

        info!(id, reviews = product.reviews.len(), images = product.images.len(), "product loaded");
        Ok(product)
    }
}

/// Stateful detail view. Re-sorting and gallery moves happen on the loaded
/// product without refetching.
pub struct DetailController {
    view: DetailView,
    tracker: RequestTracker,
    state: Mutex<ViewState<ProductDetail>>,
    product: Mutex<Option<Product>>,
}

impl DetailController {
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self {
            view: DetailView::new(source),
            tracker: RequestTracker::new(),
            state: Mutex::new(ViewState::Idle),
            product: Mutex::new(None),
        }
    }

    pub async fn open(&self, id: u64, sort: ReviewSort) -> bool {
        let ticket = self.tracker.issue();
        self.set(ViewState::Loading);

        let result = self.view.fetch(id).await;
        if !self.tracker.is_current(ticket) {
            debug!(id, generation = ticket.generation(), "discarding stale product response");
            return false;
        }
        let (product, state) = match result {
            Ok(product) => {
                let detail = ProductDetail::build(product.clone(), sort, 0);
                (Some(product), ViewState::Loaded(detail))
            }
            Err(failure) => (None, ViewState::Failed(failure)),
        };
        *self.product.lock().unwrap_or_else(|p| p.into_inner()) = product;
        self.set(state);
        true
    }

    /// Re-sort reviews on the loaded product; no-op unless loaded.
    pub fn sort_reviews(&self, sort: ReviewSort) {
        self.rebuild(|detail| (sort, detail.gallery.current_index));
    }

    pub fn next_image(&self) {
        self.rebuild(|detail| (detail.review_sort, detail.gallery.next_index));
    }

    pub fn previous_image(&self) {
        self.rebuild(|detail| (detail.review_sort, detail.gallery.previous_index));
    }

    pub fn select_image(&self, index: usize) {
        self.rebuild(|detail| {
            let last = detail.gallery.images.len().saturating_sub(1);
            (detail.review_sort, index.min(last))
        });
    }

    pub fn state(&self) -> ViewState<ProductDetail> {
        self.state
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn rebuild(&self, next: impl FnOnce(&ProductDetail) -> (ReviewSort, usize)) {
        let current = self.state();
        let Some(detail) = current.loaded() else {
            return;
        };
        let product = self.product.lock().unwrap_or_else(|p| p.into_inner()).clone();
        if let Some(product) = product {
            let (sort, index) = next(detail);
            self.set(ViewState::Loaded(ProductDetail::build(product, sort, index)));
        }
    }

    fn set(&self, next: ViewState<ProductDetail>) {
        *self.state.lock().unwrap_or_else(|p| p.into_inner()) = next;
    }
}
