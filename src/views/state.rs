use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::catalog::FetchError;

pub const PRODUCTS_FAILED: &str = "Failed to load products. Please try again later.";
pub const PRODUCT_FAILED: &str = "Failed to load product. Please try again later.";

/// Lifecycle of one fetch-driven view: Idle → Loading → Loaded | Failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(LoadFailure),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            ViewState::Failed(f) => Some(f),
            _ => None,
        }
    }
}

impl<T> From<Result<T, LoadFailure>> for ViewState<T> {
    fn from(res: Result<T, LoadFailure>) -> Self {
        match res {
            Ok(v) => ViewState::Loaded(v),
            Err(f) => ViewState::Failed(f),
        }
    }
}

/// User-facing failure. Network and HTTP errors collapse into one message;
/// the caller gets a link that repeats the same request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadFailure {
    pub message: String,
    pub retry_href: String,
    #[serde(skip)]
    pub not_found: bool,
}

impl LoadFailure {
    pub fn from_fetch(message: &str, retry_href: String, err: &FetchError) -> Self {
        tracing::warn!(error = %err, retry = %retry_href, "view load failed");
        Self {
            message: message.to_string(),
            retry_href,
            not_found: err.is_not_found(),
        }
    }
}

/// Ticket for one issued request; compare against the tracker before applying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Request-generation counter. Responses for anything but the latest ticket
/// are stale and must be dropped.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let tracker = RequestTracker::new();
        let first = tracker.issue();
        assert!(tracker.is_current(first));
        let second = tracker.issue();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn failure_collapses_error_kinds() {
        let http = FetchError::Http {
            status: 500,
            url: "u".into(),
        };
        let missing = FetchError::Http {
            status: 404,
            url: "u".into(),
        };
        let a = LoadFailure::from_fetch(PRODUCTS_FAILED, "/products".into(), &http);
        let b = LoadFailure::from_fetch(PRODUCTS_FAILED, "/products".into(), &missing);
        assert_eq!(a.message, b.message);
        assert!(!a.not_found);
        assert!(b.not_found);

        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["retryHref"], "/products");
        assert!(json.get("notFound").is_none());
    }

    #[test]
    fn view_state_from_result() {
        let ok: ViewState<u8> = Ok(3).into();
        assert_eq!(ok.loaded(), Some(&3));
        let failed: ViewState<u8> = Err(LoadFailure {
            message: "x".into(),
            retry_href: "/".into(),
            not_found: false,
        })
        .into();
        assert!(failed.failure().is_some());
        assert!(ViewState::<u8>::Loading.loaded().is_none());
    }
}
