pub mod pagination;
pub mod query;

pub use pagination::{PageLinks, PAGE_SIZE};
pub use query::{BrowseOverrides, BrowseQuery, SortBy, SortOrder, RESET_HREF};
