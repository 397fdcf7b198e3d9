//! Configuration constants, environment overrides and input validation.

use std::time::Duration;

use url::Url;

use crate::error::{HarvesterError, Result};

/// XML namespace of the Seznam OVM export.
pub const OVM_NAMESPACE: &str = "http://www.czechpoint.cz/spravadat/p/ovm/datafile/seznamovm/v1";

/// Official open-data export of the registry (full XML).
pub const OVM_EXPORT_URL: &str = "https://seznam.gov.cz/ovm/datafile.do?format=xml&service=seznamovm";

/// Czech Wikipedia API endpoint used for OpenSearch lookups.
pub const WIKI_API_URL: &str = "https://cs.wikipedia.org/w/api.php";

/// Wiki namespace searched by OpenSearch (0 = articles).
pub const SEARCH_NAMESPACE: u32 = 0;

/// HTTP timeout in seconds.
///
/// The full registry export is tens of megabytes.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default maximum HTTP response size in bytes (200 MB).
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 200 * 1024 * 1024;

/// Attempts made when downloading the registry export.
pub const EXPORT_DOWNLOAD_ATTEMPTS: u32 = 3;

/// Runtime configuration for network access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvesterConfig {
    pub export_url: String,
    pub wiki_api_url: String,
    pub timeout: Duration,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            export_url: OVM_EXPORT_URL.to_string(),
            wiki_api_url: WIKI_API_URL.to_string(),
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
        }
    }
}

impl HarvesterConfig {
    /// Build configuration from `OVM_EXPORT_URL`, `OVM_WIKI_API_URL` and
    /// `OVM_HTTP_TIMEOUT_SECS`, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let export_url = std::env::var("OVM_EXPORT_URL").unwrap_or(defaults.export_url);
        validate_url(&export_url)?;

        let wiki_api_url = std::env::var("OVM_WIKI_API_URL").unwrap_or(defaults.wiki_api_url);
        validate_url(&wiki_api_url)?;

        let timeout = std::env::var("OVM_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Ok(Self {
            export_url,
            wiki_api_url,
            timeout,
        })
    }

    pub fn with_export_url(mut self, url: impl Into<String>) -> Self {
        self.export_url = url.into();
        self
    }

    pub fn with_wiki_api_url(mut self, url: impl Into<String>) -> Self {
        self.wiki_api_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Validate that a string is an absolute http(s) URL.
///
/// # Examples
/// ```
/// use ovm_harvester::config::validate_url;
///
/// assert!(validate_url("https://cs.wikipedia.org/w/api.php").is_ok());
/// assert!(validate_url("cs.wikipedia.org").is_err());
/// ```
pub fn validate_url(url: &str) -> Result<()> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(HarvesterError::InvalidUrl(url.to_string())),
    }
}
