// src/pipeline/scrape.rs

//! Paginate → extract → persist.

use crate::error::Result;
use crate::models::{Config, WineRecord};
use crate::services::{
    ExplorePage, ExploreQuery, ExploreSource, extract_wine, last_page, page_range,
};
use crate::storage::WineStorage;

/// Counts for one scraper run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub records_matched: u64,
    pub pages_fetched: u32,
    pub wines_saved: usize,
}

/// Run the wine scraper from `start_page` through the last page.
///
/// Each page is extracted in full before anything is written, so a match
/// without its required fields aborts the run without a partial page.
pub fn run_scraper(
    config: &Config,
    source: &dyn ExploreSource,
    storage: &dyn WineStorage,
    start_page: u32,
) -> Result<ScrapeSummary> {
    let filter = &config.filter;
    let mut known_ids = storage.load()?.ids;
    log::info!("Loaded {} previously saved wines", known_ids.len());

    let first = source.fetch(&ExploreQuery::count(filter))?;
    let records_matched = ExplorePage::from_body(&first).records_matched;
    log::info!("Number of matches: {}", records_matched);

    let mut summary = ScrapeSummary {
        records_matched,
        ..ScrapeSummary::default()
    };

    let last = last_page(records_matched, config.api.records_per_page);
    for page in page_range(start_page, last) {
        log::info!("Processing page: {}", page);

        let body = source.fetch(&ExploreQuery::page(filter, page))?;
        let matches = ExplorePage::from_body(&body).matches;

        let wines = matches
            .iter()
            .map(|matched| {
                log::debug!("{}", matched);
                extract_wine(matched)
            })
            .collect::<Result<Vec<WineRecord>>>()?;

        let new_ids = storage.save(&known_ids, &wines)?;
        summary.pages_fetched += 1;
        summary.wines_saved += new_ids.len();
        known_ids.extend(new_ids);
    }

    Ok(summary)
}
