// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::models::ApiConfig;

/// Create a configured blocking HTTP client.
pub fn create_client(config: &ApiConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(&config.user_agent);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// GET a URL with query parameters and decode the body as JSON.
///
/// Error statuses and undecodable bodies are returned as errors.
pub fn fetch_json(client: &Client, url: &Url, query: &[(String, String)]) -> Result<Value> {
    let response = client
        .get(url.clone())
        .query(query)
        .send()?
        .error_for_status()?;
    Ok(response.json()?)
}
