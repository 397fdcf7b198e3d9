//! Error types for the harvester.
//!
//! A single invalid registry entry or an unrecognised search response is
//! never an error; those degrade to "no result". Everything here is a failure
//! of the whole operation (transport, malformed document, bad input).

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Downloading a specific resource failed.
    #[error("Failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// All retry attempts failed.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Response body exceeded the configured limit.
    #[error("Response from {url} is too large: {size} bytes (limit {limit})")]
    ResponseTooLarge { url: String, size: u64, limit: u64 },

    /// URL given on the command line or in the environment is unusable.
    #[error("Invalid URL: '{0}'. Expected an absolute http(s) URL")]
    InvalidUrl(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// JSON decoding failed.
    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog line whose file name token is empty.
    #[error("Invalid catalog entry on line {line}: '{entry}' has no file name after ':'")]
    InvalidCatalogEntry { line: usize, entry: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
