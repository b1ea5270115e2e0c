//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API endpoint and HTTP client settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Base search filter, shared by every page request
    #[serde(default)]
    pub filter: ExploreFilter,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.records_per_page == 0 {
            return Err(AppError::validation("api.records_per_page must be > 0"));
        }
        if self.api.timeout_secs == Some(0) {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if !self.api.base_url.ends_with('/') {
            return Err(AppError::validation(format!(
                "api.base_url must end with '/': {}",
                self.api.base_url
            )));
        }
        Url::parse(&self.api.base_url)?;
        if self.api.explore_path.trim().is_empty() {
            return Err(AppError::validation("api.explore_path is empty"));
        }

        let filter = &self.filter;
        if !filter.min_rating.is_finite() || filter.min_rating < 0.0 {
            return Err(AppError::validation(
                "filter.min_rating must be a non-negative number",
            ));
        }
        if let Some(min) = filter.price_range_min {
            if min > filter.price_range_max {
                return Err(AppError::validation(format!(
                    "filter.price_range_min ({min}) exceeds filter.price_range_max ({})",
                    filter.price_range_max
                )));
            }
        }
        Ok(())
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog API, with trailing slash
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Search endpoint, relative to `base_url`
    #[serde(default = "defaults::explore_path")]
    pub explore_path: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Matches returned per page by the search endpoint
    #[serde(default = "defaults::records_per_page")]
    pub records_per_page: u64,

    /// Request timeout in seconds; the HTTP client default when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            explore_path: defaults::explore_path(),
            user_agent: defaults::user_agent(),
            records_per_page: defaults::records_per_page(),
            timeout_secs: None,
        }
    }
}

/// Search filters sent with every request.
///
/// List filters go out as repeated `name[]` parameters; unset optional
/// filters are omitted from the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploreFilter {
    #[serde(default = "defaults::min_rating")]
    pub min_rating: f64,

    #[serde(default = "defaults::price_range_max")]
    pub price_range_max: u32,

    #[serde(default)]
    pub price_range_min: Option<u32>,

    /// Two-letter country codes, e.g. `fr`, `it`, `pt`
    #[serde(default)]
    pub country_codes: Vec<String>,

    #[serde(default)]
    pub region_ids: Vec<u32>,

    #[serde(default)]
    pub grape_ids: Vec<u32>,

    #[serde(default)]
    pub food_ids: Vec<u32>,

    /// e.g. `varietal`
    #[serde(default)]
    pub grape_filter: Option<String>,

    /// e.g. `ratings_average`
    #[serde(default)]
    pub order_by: Option<String>,

    /// `asc` or `desc`
    #[serde(default)]
    pub order: Option<String>,
}

impl Default for ExploreFilter {
    fn default() -> Self {
        Self {
            min_rating: defaults::min_rating(),
            price_range_max: defaults::price_range_max(),
            price_range_min: None,
            country_codes: Vec::new(),
            region_ids: Vec::new(),
            grape_ids: Vec::new(),
            food_ids: Vec::new(),
            grape_filter: None,
            order_by: None,
            order: None,
        }
    }
}

impl ExploreFilter {
    /// Query parameters for this filter, without any page number.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("min_rating".to_string(), self.min_rating.to_string()),
            (
                "price_range_max".to_string(),
                self.price_range_max.to_string(),
            ),
        ];

        if let Some(min) = self.price_range_min {
            pairs.push(("price_range_min".to_string(), min.to_string()));
        }

        let lists = [
            ("country_codes[]", strings(&self.country_codes)),
            ("region_ids[]", strings(&self.region_ids)),
            ("grape_ids[]", strings(&self.grape_ids)),
            ("food_ids[]", strings(&self.food_ids)),
        ];
        for (key, values) in lists {
            pairs.extend(values.into_iter().map(|v| (key.to_string(), v)));
        }

        let options = [
            ("grape_filter", &self.grape_filter),
            ("order_by", &self.order_by),
            ("order", &self.order),
        ];
        for (key, value) in options {
            if let Some(value) = value {
                pairs.push((key.to_string(), value.clone()));
            }
        }

        pairs
    }
}

fn strings<T: ToString>(values: &[T]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

mod defaults {
    pub fn base_url() -> String {
        "https://www.vivino.com/api/".into()
    }
    pub fn explore_path() -> String {
        "explore/explore".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".into()
    }
    pub fn records_per_page() -> u64 {
        25
    }
    pub fn min_rating() -> f64 {
        2.0
    }
    pub fn price_range_max() -> u32 {
        150
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.api.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.api.records_per_page = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_base_url_without_slash() {
        let mut config = Config::default();
        config.api.base_url = "https://www.vivino.com/api".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_price_range() {
        let mut config = Config::default();
        config.filter.price_range_min = Some(200);
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            records_per_page = 50

            [filter]
            country_codes = ["pt", "es"]
            "#,
        )
        .unwrap();

        assert_eq!(config.api.records_per_page, 50);
        assert_eq!(config.api.explore_path, "explore/explore");
        assert_eq!(config.filter.min_rating, 2.0);
        assert_eq!(config.filter.price_range_max, 150);
        assert_eq!(config.filter.country_codes, vec!["pt", "es"]);
    }

    #[test]
    fn default_filter_query_pairs() {
        let pairs = ExploreFilter::default().query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("min_rating".to_string(), "2".to_string()),
                ("price_range_max".to_string(), "150".to_string()),
            ]
        );
    }

    #[test]
    fn list_filters_repeat_keys() {
        let filter = ExploreFilter {
            country_codes: vec!["fr".to_string(), "it".to_string()],
            order_by: Some("ratings_average".to_string()),
            ..ExploreFilter::default()
        };
        let pairs = filter.query_pairs();

        let countries: Vec<_> = pairs
            .iter()
            .filter(|(k, _)| k == "country_codes[]")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(countries, vec!["fr", "it"]);
        assert!(pairs.contains(&("order_by".to_string(), "ratings_average".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "order"));
    }
}
