//! Typed browse state decoded from, and encoded back into, the listing URL.
//!
//! The URL is the only store for listing state: every navigation decodes a
//! fresh `BrowseQuery`, and every link is produced by `encode`.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::pagination::PAGE_SIZE;

pub const BROWSE_PATH: &str = "/products";
/// Navigating here clears search, category, sort and page.
pub const RESET_HREF: &str = BROWSE_PATH;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    None,
    Price,
}

impl SortBy {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("price") {
            SortBy::Price
        } else {
            SortBy::None
        }
    }

    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SortBy::None => None,
            SortBy::Price => Some("price"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else if raw.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::None
        }
    }

    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SortOrder::None => None,
            SortOrder::Asc => Some("asc"),
            SortOrder::Desc => Some("desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseQuery {
    /// 1-based; never 0.
    pub page: u32,
    pub search: String,
    pub category: String,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            category: String::new(),
            sort_by: SortBy::None,
            order: SortOrder::None,
        }
    }
}

/// Field-wise changes applied on top of the current query by `encode`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseOverrides {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<SortBy>,
    pub order: Option<SortOrder>,
}

impl BrowseOverrides {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Price sort control: `None` clears both `sortBy` and `order`.
    pub fn price_sort(order: SortOrder) -> Self {
        let sort_by = match order {
            SortOrder::None => SortBy::None,
            SortOrder::Asc | SortOrder::Desc => SortBy::Price,
        };
        Self {
            sort_by: Some(sort_by),
            order: Some(order),
            ..Self::default()
        }
    }

    fn touches_filters(&self) -> bool {
        self.search.is_some()
            || self.category.is_some()
            || self.sort_by.is_some()
            || self.order.is_some()
    }
}

impl BrowseQuery {
    /// Decode a raw query string (leading `?` optional). Never fails:
    /// malformed or missing values fall back to defaults.
    pub fn decode(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut page = None;
        let mut search = None;
        let mut category = None;
        let mut sort_by = None;
        let mut order = None;

        // First occurrence of a key wins.
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "page" if page.is_none() => page = Some(parse_page(&value)),
                "search" if search.is_none() => search = Some(value.into_owned()),
                "category" if category.is_none() => category = Some(value.into_owned()),
                "sortBy" if sort_by.is_none() => sort_by = Some(SortBy::parse(&value)),
                "order" if order.is_none() => order = Some(SortOrder::parse(&value)),
                _ => {}
            }
        }

        Self {
            page: page.unwrap_or(1),
            search: search.unwrap_or_default(),
            category: category.unwrap_or_default(),
            sort_by: sort_by.unwrap_or_default(),
            order: order.unwrap_or_default(),
        }
    }

    /// Apply `overrides` and serialize the non-default fields. Any filter or
    /// sort override sends the user back to page 1.
    pub fn encode(&self, overrides: &BrowseOverrides) -> String {
        self.merged(overrides).to_query_string()
    }

    /// The query that `encode` would serialize.
    pub fn merged(&self, overrides: &BrowseOverrides) -> BrowseQuery {
        let mut next = self.clone();
        if let Some(search) = &overrides.search {
            next.search = search.clone();
        }
        if let Some(category) = &overrides.category {
            next.category = category.clone();
        }
        if let Some(sort_by) = overrides.sort_by {
            next.sort_by = sort_by;
        }
        if let Some(order) = overrides.order {
            next.order = order;
        }
        next.page = if overrides.touches_filters() {
            1
        } else {
            overrides.page.unwrap_or(self.page).max(1)
        };
        next
    }

    pub fn to_query_string(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        if self.page > 1 {
            ser.append_pair("page", &self.page.to_string());
        }
        if !self.search.is_empty() {
            ser.append_pair("search", &self.search);
        }
        if !self.category.is_empty() {
            ser.append_pair("category", &self.category);
        }
        if let Some(sort_by) = self.sort_by.as_param() {
            ser.append_pair("sortBy", sort_by);
        }
        if let Some(order) = self.order.as_param() {
            ser.append_pair("order", order);
        }
        ser.finish()
    }

    /// Browse route link for this state.
    pub fn href(&self) -> String {
        let qs = self.to_query_string();
        if qs.is_empty() {
            BROWSE_PATH.to_string()
        } else {
            format!("{BROWSE_PATH}?{qs}")
        }
    }

    /// Link for this state with `overrides` applied.
    pub fn href_with(&self, overrides: &BrowseOverrides) -> String {
        self.merged(overrides).href()
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty()
            || !self.category.is_empty()
            || self.sort_by != SortBy::None
            || self.order != SortOrder::None
    }

    /// Items skipped upstream before this page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * PAGE_SIZE as u64
    }

    /// Query parameters for the upstream listing call, in wire order.
    pub fn upstream_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", PAGE_SIZE.to_string()),
            ("skip", self.skip().to_string()),
        ];
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if !self.category.is_empty() {
            params.push(("category", self.category.clone()));
        }
        if let Some(sort_by) = self.sort_by.as_param() {
            params.push(("sortBy", sort_by.to_string()));
        }
        if let Some(order) = self.order.as_param() {
            params.push(("order", order.to_string()));
        }
        params
    }
}

impl fmt::Display for BrowseQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn parse_page(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => 1,
        Ok(n) => n,
    }
}
