//! Pipeline entry points for crawler operations.
//!
//! - `run_scraper`: Page through catalog search results and persist new wines

pub mod scrape;

pub use scrape::{ScrapeSummary, run_scraper};
