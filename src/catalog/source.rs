use async_trait::async_trait;
use thiserror::Error;

use super::models::{Category, Product, ProductPage};
use crate::browse::query::BrowseQuery;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("http {status}: {url}")]
    Http { status: u16, url: String },
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Upstream reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Http { status: 404, .. })
    }
}

/// Read-only product catalog the storefront renders from.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// One listing page for the decoded browse state.
    async fn list_products(&self, query: &BrowseQuery) -> Result<ProductPage, FetchError>;

    async fn get_product(&self, id: u64) -> Result<Product, FetchError>;

    async fn list_categories(&self) -> Result<Vec<Category>, FetchError>;
}
