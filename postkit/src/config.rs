use std::time::Duration;

use url::Url;

use crate::error::Result;

/// Default JSONPlaceholder host serving users, posts and comments.
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default DummyJSON host serving search and the richer user listing.
pub const DEFAULT_SEARCH_API_URL: &str = "https://dummyjson.com";

/// Page size used by the post feed.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Configuration for the postkit client.
#[derive(Debug, Clone)]
pub struct PostkitConfig {
    /// Base URL for the posts backend (e.g. `https://jsonplaceholder.typicode.com`).
    pub api_url: String,
    /// Base URL for the search backend.
    pub search_api_url: String,
    /// Number of posts requested per feed page.
    pub page_size: u32,
    /// Per-request timeout; `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for PostkitConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            search_api_url: DEFAULT_SEARCH_API_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Some(Duration::from_secs(15)),
        }
    }
}

impl PostkitConfig {
    /// Check that both base URLs parse and the page size is usable.
    ///
    /// # Errors
    ///
    /// Returns [`PostkitError::Url`](crate::PostkitError::Url) for a malformed URL.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_url)?;
        Url::parse(&self.search_api_url)?;
        Ok(())
    }

    /// Page size clamped to at least one item.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_mocks() {
        let config = PostkitConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_url() {
        let config = PostkitConfig {
            api_url: "not a url".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let config = PostkitConfig {
            page_size: 0,
            ..Default::default()
        };
        assert_eq!(config.effective_page_size(), 1);
    }
}
