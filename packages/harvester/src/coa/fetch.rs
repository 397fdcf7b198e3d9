//! Whole-page text retrieval.

use crate::error::Result;

/// Fetches the textual body (HTML or wikitext) at a URL in one piece.
pub trait PageFetcher {
    fn fetch_text(&self, url: &str) -> Result<String>;
}
