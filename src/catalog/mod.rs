pub mod models;
pub mod remote;
pub mod source;

pub use models::{Category, Product, ProductPage, Review};
pub use remote::RemoteProductSource;
pub use source::{FetchError, ProductSource};

#[cfg(test)]
pub(crate) mod stub {
    //! In-memory catalog for view and handler tests.
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::browse::query::BrowseQuery;

    #[derive(Default)]
    pub struct StubSource {
        pub products: Vec<Product>,
        pub categories: Vec<Category>,
        pub total: Option<u64>,
        /// When set, every call fails with this upstream status.
        pub fail_status: Option<u16>,
        pub calls: AtomicUsize,
        pub seen_queries: Mutex<Vec<BrowseQuery>>,
    }

    impl StubSource {
        pub fn with_products(count: usize) -> Self {
            Self {
                products: (1..=count as u64).map(product).collect(),
                ..Self::default()
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                fail_status: Some(status),
                ..Self::default()
            }
        }

        fn check(&self, url: &str) -> Result<(), FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_status {
                Some(status) => Err(FetchError::Http {
                    status,
                    url: url.to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ProductSource for StubSource {
        async fn list_products(&self, query: &BrowseQuery) -> Result<ProductPage, FetchError> {
            self.check("stub://products")?;
            if let Ok(mut seen) = self.seen_queries.lock() {
                seen.push(query.clone());
            }
            Ok(ProductPage {
                products: self.products.clone(),
                total: self.total,
            })
        }

        async fn get_product(&self, id: u64) -> Result<Product, FetchError> {
            self.check(&format!("stub://products/{id}"))?;
            self.products
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| FetchError::Http {
                    status: 404,
                    url: format!("stub://products/{id}"),
                })
        }

        async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
            self.check("stub://categories")?;
            Ok(self.categories.clone())
        }
    }

    pub fn product(id: u64) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            description: String::new(),
            price: 10.0 + id as f64,
            category: "beauty".into(),
            stock: 5,
            images: vec![format!("https://img/{id}/1.png"), format!("https://img/{id}/2.png")],
            tags: vec!["beauty".into()],
            reviews: Vec::new(),
            brand: None,
            thumbnail: None,
            rating: Some(4.0),
            discount_percentage: None,
        }
    }

    pub fn review(name: &str, rating: u8, ymd: (i32, u32, u32)) -> Review {
        Review {
            reviewer_name: name.into(),
            date: Utc
                .with_ymd_and_hms(ymd.0, ymd.1, ymd.2, 0, 0, 0)
                .single()
                .unwrap_or_else(Utc::now),
            comment: format!("{name} says hi"),
            rating,
        }
    }
}
