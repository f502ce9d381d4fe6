//! Fetch-driven views. Each view issues one upstream call per load and
//! turns the result into a serializable page model or a `LoadFailure`.

pub mod browse;
pub mod detail;
pub mod gallery;
pub mod reviews;
pub mod state;

pub use browse::{BrowseController, BrowsePage, BrowseView, ProductCard};
pub use detail::{DetailController, DetailView, ProductDetail};
pub use gallery::{Gallery, ImageCarousel};
pub use reviews::{sort_reviews, DateOrder, RatingOrder, ReviewSort};
pub use state::{LoadFailure, RequestTicket, RequestTracker, ViewState};
