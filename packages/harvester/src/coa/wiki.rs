//! Wikipedia client backing the coat-of-arms lookup.
//!
//! Neither call retries: a failed request fails the lookup for that name.

use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use super::fetch::PageFetcher;
use super::search::SearchIndex;
use crate::config::{HarvesterConfig, SEARCH_NAMESPACE};
use crate::error::{HarvesterError, Result};
use crate::http::{bytes_to_string, create_client, download_bytes};

/// Blocking client for the MediaWiki OpenSearch API and page downloads.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: Client,
    api_url: String,
}

impl WikiClient {
    /// Create a client from configuration.
    pub fn new(config: &HarvesterConfig) -> Result<Self> {
        Ok(Self::with_client(
            create_client(config)?,
            config.wiki_api_url.clone(),
        ))
    }

    /// Wrap an existing HTTP client.
    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    /// Build the OpenSearch request URL for `query`.
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let namespace = SEARCH_NAMESPACE.to_string();
        Url::parse_with_params(
            &self.api_url,
            &[
                ("action", "opensearch"),
                ("search", query),
                ("limit", "1"),
                ("namespace", namespace.as_str()),
                ("format", "json"),
            ],
        )
        .map_err(|_| HarvesterError::InvalidUrl(self.api_url.clone()))
    }
}

impl SearchIndex for WikiClient {
    fn open_search(&self, query: &str) -> Result<Value> {
        let url = self.search_url(query)?;
        let bytes = download_bytes(&self.http, url.as_str(), 1)?;

        // A body that is not JSON is an unrecognised shape, not a failure.
        Ok(serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::debug!(error = %e, query, "Search response is not JSON");
            Value::Null
        }))
    }
}

impl PageFetcher for WikiClient {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let bytes = download_bytes(&self.http, url, 1)?;
        Ok(bytes_to_string(&bytes, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WikiClient {
        WikiClient::new(&HarvesterConfig::default()).unwrap()
    }

    #[test]
    fn test_search_url_parameters() {
        let url = client().search_url("Dvůr Králové nad Labem").unwrap();
        assert_eq!(url.host_str(), Some("cs.wikipedia.org"));
        assert_eq!(url.path(), "/w/api.php");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            [
                ("action".to_string(), "opensearch".to_string()),
                ("search".to_string(), "Dvůr Králové nad Labem".to_string()),
                ("limit".to_string(), "1".to_string()),
                ("namespace".to_string(), "0".to_string()),
                ("format".to_string(), "json".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_url_invalid_base() {
        let wiki = WikiClient::with_client(Client::new(), "not a url");
        assert!(matches!(
            wiki.search_url("Brno"),
            Err(HarvesterError::InvalidUrl(_))
        ));
    }
}
