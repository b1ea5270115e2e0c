//! Service layer for the wine crawler.
//!
//! - `explore`: Paginated catalog search requests
//! - `extract`: Normalization of raw matches into wine records

pub mod explore;
pub mod extract;

pub use explore::{ExploreClient, ExplorePage, ExploreQuery, ExploreSource, last_page, page_range};
pub use extract::extract_wine;
