//! Catalog of known coat-of-arms files on Wikimedia Commons.
//!
//! Each entry is a full Commons URL such as
//! `https://commons.wikimedia.org/wiki/File:Trutnov_CoA_CZ.svg`. Matching uses
//! the token after the last `:` (`Trutnov_CoA_CZ.svg`).

use crate::error::{HarvesterError, Result};

/// Bundled list of SVG coats of arms, one URL per line.
const BUILTIN_CATALOG: &str = include_str!("../../data/coa_catalog.txt");

/// Return the part of `entry` after its last `:`, or `""` when there is none.
///
/// # Examples
/// ```
/// use ovm_harvester::coa::normalize_entry;
///
/// assert_eq!(
///     normalize_entry("https://commons.wikimedia.org/wiki/File:Foo_CoA.svg"),
///     "Foo_CoA.svg"
/// );
/// assert_eq!(normalize_entry("https://example.org/a:b:c"), "c");
/// assert_eq!(normalize_entry("no-colon"), "");
/// ```
pub fn normalize_entry(entry: &str) -> &str {
    entry.rsplit_once(':').map(|(_, token)| token).unwrap_or("")
}

/// A catalog URL together with its match token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    url: String,
    token: String,
}

impl CatalogEntry {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Immutable, ordered list of known coat-of-arms URLs.
///
/// Every entry has a non-empty token, so no entry can match arbitrary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Parse a catalog from text with one URL per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. A line whose
    /// token would be empty is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let url = line.trim();
            if url.is_empty() || url.starts_with('#') {
                continue;
            }

            let token = normalize_entry(url);
            if token.is_empty() {
                return Err(HarvesterError::InvalidCatalogEntry {
                    line: idx + 1,
                    entry: url.to_string(),
                });
            }

            entries.push(CatalogEntry {
                url: url.to_string(),
                token: token.to_string(),
            });
        }

        Ok(Self { entries })
    }

    /// Load the catalog bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_CATALOG)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// All catalog URLs whose token occurs in `text`, in catalog order.
    ///
    /// Matching is a case-sensitive substring search with no word boundaries.
    pub fn matches(&self, text: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| text.contains(entry.token.as_str()))
            .map(|entry| entry.url.as_str())
            .collect()
    }
}
