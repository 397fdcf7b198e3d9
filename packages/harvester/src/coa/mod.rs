//! Coat-of-arms heuristic.
//!
//! Search for the municipality's wiki page, download it, and pick the first
//! known Commons coat-of-arms file mentioned in it.

mod catalog;
mod fetch;
mod resolver;
mod search;
mod wiki;

pub use catalog::{normalize_entry, Catalog, CatalogEntry};
pub use fetch::PageFetcher;
pub use resolver::CoaResolver;
pub use search::{extract_url_from_response, guess_page, SearchIndex};
pub use wiki::WikiClient;
