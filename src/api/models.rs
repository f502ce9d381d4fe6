// API request/response models (DTOs)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::api::request_id::RequestId;
use crate::views::{DateOrder, LoadFailure, RatingOrder, ReviewSort};

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Link that repeats the failed request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            retry: None,
            meta: Some(Meta::now()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            retry: None,
            meta: Some(Meta::now()),
        }
    }

    pub fn failure(failure: &LoadFailure) -> Self {
        Self {
            retry: Some(failure.retry_href.clone()),
            ..Self::error(failure.message.clone())
        }
    }

    /// Stamp the id assigned by the request-id middleware.
    pub fn for_request(mut self, request_id: &RequestId) -> Self {
        if let Some(meta) = self.meta.as_mut() {
            meta.request_id = request_id.as_str().to_string();
        }
        self
    }
}

/// Metadata included in all API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct Meta {
    pub timestamp: DateTime<Utc>,
    /// Filled by `ApiResponse::for_request`; omitted until then.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub request_id: String,
    pub version: String,
}

impl Meta {
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now(),
            request_id: String::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub product_api: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Landing page payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub title: String,
    pub tagline: String,
    pub shop_now: NavLink,
    pub navigation: Vec<NavLink>,
}

impl HomeResponse {
    pub fn storefront() -> Self {
        Self {
            title: "Welcome to HerStore: Your One-Stop Shop for Everything!".to_string(),
            tagline: "Discover an unbeatable selection of products that cater to all your needs."
                .to_string(),
            shop_now: NavLink::new("Shop Now", "/products"),
            // Cart and Login are navigation targets only.
            navigation: vec![
                NavLink::new("Home", "/"),
                NavLink::new("Products", "/products"),
                NavLink::new("Cart", "/cart"),
                NavLink::new("Login", "/login"),
            ],
        }
    }
}

/// Detail page controls: `dateOrder`, `ratingOrder`, `image`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailParams {
    pub sort: ReviewSort,
    pub image: usize,
}

impl DetailParams {
    /// Lenient like the browse codec: bad values fall back to defaults.
    pub fn decode(raw: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(raw.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "dateOrder" => params.sort.date_order = DateOrder::parse(&value),
                "ratingOrder" => params.sort.rating_order = RatingOrder::parse(&value),
                "image" => params.image = value.trim().parse().unwrap_or(0),
                _ => {}
            }
        }
        params
    }
}
