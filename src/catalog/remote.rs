use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{Category, Product, ProductPage};
use super::source::{FetchError, ProductSource};
use crate::browse::query::BrowseQuery;

pub const DEFAULT_BASE_URL: &str = "https://next-ecommerce-api.vercel.app";

/// HTTP client for the upstream e-commerce API.
///
/// Endpoints:
/// - GET /products?limit=&skip=&search=&category=&sortBy=&order=
/// - GET /products/{id}
/// - GET /categories
///
/// No retries and no caching: every call goes to the network and a failure
/// is reported to the caller as-is.
#[derive(Debug, Clone)]
pub struct RemoteProductSource {
    base_url: String,
    http: Client,
}

impl RemoteProductSource {
    /// `timeout_secs = None` leaves the client without a request timeout.
    pub fn new(base_url: Option<&str>, timeout_secs: Option<u64>) -> Result<Self, FetchError> {
        let base_url = base_url
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let mut builder = Client::builder()
            .user_agent(concat!("her-store/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(url = %url, ?params, "catalog request");

        let resp = self.http.get(&url).query(params).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "catalog request failed");
            FetchError::Network(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "catalog returned non-success status");
            return Err(FetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ProductSource for RemoteProductSource {
    async fn list_products(&self, query: &BrowseQuery) -> Result<ProductPage, FetchError> {
        self.get_json("products", &query.upstream_params()).await
    }

    async fn get_product(&self, id: u64) -> Result<Product, FetchError> {
        self.get_json(&format!("products/{id}"), &[]).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.get_json("categories", &[]).await
    }
}
