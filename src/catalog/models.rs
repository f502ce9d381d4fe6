use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Product as served by the remote catalog. Read-only; never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Upstream average rating (0-5); not derived from `reviews`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
}

impl Product {
    /// Image used on listing cards: upstream thumbnail, else the first gallery image.
    pub fn cover_image(&self) -> Option<&str> {
        self.thumbnail
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.images.first().map(String::as_str))
    }

    /// Tags deduplicated in first-seen order.
    pub fn tag_set(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !out.contains(&tag.as_str()) {
                out.push(tag);
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(deserialize_with = "de_review_date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub comment: String,
    pub rating: u8,
}

impl Review {
    /// Number of filled stars on a five star scale.
    pub fn filled_stars(&self) -> u8 {
        self.rating.min(5)
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
fn de_review_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_review_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid review date: {raw}")))
}

pub fn parse_review_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Category entry for the filter control. Upstream sends either bare strings
/// or `{ "slug", "name" }` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Plain(String),
            Object {
                slug: String,
                #[serde(default)]
                name: Option<String>,
            },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Plain(slug) => Category {
                name: slug.clone(),
                slug,
            },
            Raw::Object { slug, name } => Category {
                name: name.unwrap_or_else(|| slug.clone()),
                slug,
            },
        })
    }
}

/// One page of listing results, in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Total matching items, when the upstream reports it.
    pub total: Option<u64>,
}

impl<'de> Deserialize<'de> for ProductPage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bare(Vec<Product>),
            Envelope {
                products: Vec<Product>,
                #[serde(default)]
                total: Option<u64>,
            },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Bare(products) => ProductPage {
                products,
                total: None,
            },
            Raw::Envelope { products, total } => ProductPage { products, total },
        })
    }
}
