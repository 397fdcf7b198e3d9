//! OVM Harvester - Convert the Czech registry of public-administration bodies.
//!
//! This crate turns the Seznam OVM XML export into typed [`Subjekt`] records
//! and offers a best-effort coat-of-arms lookup for municipalities.
//!
//! # Example
//!
//! ```
//! use ovm_harvester::coa::{normalize_entry, Catalog};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let page = r#"<img src="//upload.wikimedia.org/Trutnov_CoA_CZ_old.svg">"#;
//! assert_eq!(catalog.matches(page).len(), 1);
//! assert_eq!(normalize_entry(catalog.matches(page)[0]), "Trutnov_CoA_CZ_old.svg");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, environment configuration and URL validation
//! - [`types`]: Registry records (Subjekt, PravniForma, Adresa)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client and downloads
//! - [`xml`]: XML navigation helpers
//! - [`ovm`]: Registry export parsing
//! - [`coa`]: Coat-of-arms heuristic (catalog, search, resolver)
//! - [`output`]: YAML/JSON output
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod coa;
pub mod config;
pub mod error;
pub mod http;
pub mod output;
pub mod ovm;
pub mod types;
pub mod xml;

// Re-export main functions
pub use coa::{Catalog, CoaResolver};
pub use ovm::{parse_all_valid_subjects, parse_registry_xml};

// Re-export commonly used items
pub use error::{HarvesterError, Result};
pub use types::{Adresa, LegalFormCode, PravniForma, Subjekt};
