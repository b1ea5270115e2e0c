// src/services/explore.rs

//! Catalog search fetcher.
//!
//! One GET per page against the explore endpoint. The first request carries
//! no page number and is only used to read the total match count.

use std::ops::RangeInclusive;

use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::models::{Config, ExploreFilter};
use crate::utils::endpoint_url;
use crate::utils::http::{create_client, fetch_json};

/// One request against the search endpoint: the shared base filter plus
/// an optional page number.
#[derive(Debug, Clone, Copy)]
pub struct ExploreQuery<'a> {
    pub filter: &'a ExploreFilter,
    pub page: Option<u32>,
}

impl<'a> ExploreQuery<'a> {
    /// The initial request used to read `records_matched`.
    pub fn count(filter: &'a ExploreFilter) -> Self {
        Self { filter, page: None }
    }

    pub fn page(filter: &'a ExploreFilter, page: u32) -> Self {
        Self {
            filter,
            page: Some(page),
        }
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filter.query_pairs();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        pairs
    }
}

/// Anything that can answer a search query with a JSON body.
pub trait ExploreSource {
    fn fetch(&self, query: &ExploreQuery<'_>) -> Result<Value>;
}

/// Blocking HTTP client for the catalog search endpoint.
pub struct ExploreClient {
    client: Client,
    endpoint: Url,
}

impl ExploreClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: create_client(&config.api)?,
            endpoint: endpoint_url(&config.api.base_url, &config.api.explore_path)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ExploreSource for ExploreClient {
    fn fetch(&self, query: &ExploreQuery<'_>) -> Result<Value> {
        log::debug!("GET {} page={:?}", self.endpoint, query.page);
        fetch_json(&self.client, &self.endpoint, &query.query_pairs())
    }
}

/// The parts of a search response the crawler reads.
#[derive(Debug, Default)]
pub struct ExplorePage {
    pub records_matched: u64,
    pub matches: Vec<Value>,
}

impl ExplorePage {
    /// Read `explore_vintage.records_matched` and `explore_vintage.matches`,
    /// defaulting each when absent.
    pub fn from_body(body: &Value) -> Self {
        let explore = body.get("explore_vintage");

        let records_matched = explore
            .and_then(|e| e.get("records_matched"))
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let matches = explore
            .and_then(|e| e.get("matches"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Self {
            records_matched,
            matches,
        }
    }
}

/// Last page to fetch for `total` matches: the number of pages needed to
/// hold them, and at least 1 so an empty result still visits page 1.
pub fn last_page(total: u64, page_size: u64) -> u32 {
    let pages = if page_size == 0 {
        1
    } else {
        total.div_ceil(page_size).max(1)
    };
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Pages visited, inclusive of both ends; empty when `start > last`.
pub fn page_range(start: u32, last: u32) -> RangeInclusive<u32> {
    start..=last
}
