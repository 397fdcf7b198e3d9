//! Coat-of-arms guessing for a municipality.
//!
//! The lookup finds the municipality's Wikipedia page through search, downloads
//! the page and scans its source for file names from the [`Catalog`]. It is a
//! heuristic: a missing answer is normal, and a page mentioning another
//! municipality's coat of arms can produce a wrong one.

use std::sync::Arc;

use super::catalog::Catalog;
use super::fetch::PageFetcher;
use super::search::{guess_page, SearchIndex};
use super::wiki::WikiClient;
use crate::config::HarvesterConfig;
use crate::error::Result;

/// Resolves municipality names to coat-of-arms URLs.
pub struct CoaResolver<S, F> {
    search: S,
    fetcher: F,
    catalog: Arc<Catalog>,
}

impl CoaResolver<WikiClient, WikiClient> {
    /// Resolver backed by the configured Wikipedia endpoint.
    pub fn from_config(config: &HarvesterConfig, catalog: Arc<Catalog>) -> Result<Self> {
        let wiki = WikiClient::new(config)?;
        Ok(Self::new(wiki.clone(), wiki, catalog))
    }
}

impl<S: SearchIndex, F: PageFetcher> CoaResolver<S, F> {
    pub fn new(search: S, fetcher: F, catalog: Arc<Catalog>) -> Self {
        Self {
            search,
            fetcher,
            catalog,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Guess the coat-of-arms URL for `name`.
    ///
    /// Returns the first catalog entry (in catalog order) mentioned on the
    /// page, or `None` when search finds no page or the page mentions no
    /// catalog entry. Transport errors are returned as is.
    pub fn resolve(&self, name: &str) -> Result<Option<String>> {
        let Some(page_url) = guess_page(&self.search, name)? else {
            return Ok(None);
        };

        let content = self.fetcher.fetch_text(&page_url)?;
        let matches = self.catalog.matches(&content);
        if matches.len() > 1 {
            tracing::debug!(
                name,
                page = %page_url,
                candidates = matches.len(),
                "Several catalog files on page"
            );
        }

        Ok(matches.first().map(|url| (*url).to_string()))
    }

    /// Resolve several names one after another.
    ///
    /// A failure for one name is reported in its slot and does not stop the rest.
    pub fn resolve_many<'n>(
        &self,
        names: impl IntoIterator<Item = &'n str>,
    ) -> Vec<(String, Result<Option<String>>)> {
        names
            .into_iter()
            .map(|name| {
                let result = self.resolve(name);
                if let Err(e) = &result {
                    tracing::warn!(name, error = %e, "Coat-of-arms lookup failed");
                }
                (name.to_string(), result)
            })
            .collect()
    }
}
