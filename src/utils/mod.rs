//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::Result;

/// Resolve an endpoint path against a base URL.
///
/// The base must end with `/` for the path to be appended rather than
/// replace its last segment.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    Ok(Url::parse(base_url)?.join(path.trim_start_matches('/'))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("https://www.vivino.com/api/", "explore/explore").unwrap();
        assert_eq!(url.as_str(), "https://www.vivino.com/api/explore/explore");

        let url = endpoint_url("https://www.vivino.com/api/", "/explore/explore").unwrap();
        assert_eq!(url.as_str(), "https://www.vivino.com/api/explore/explore");
    }

    #[test]
    fn test_endpoint_url_rejects_garbage() {
        assert!(endpoint_url("not a url", "explore/explore").is_err());
    }
}
