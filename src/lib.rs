//! itis-mcp: search and explore the ITIS taxonomic database.
//!
//! A client for the Integrated Taxonomic Information System's public SOLR
//! index, exposed three ways over one operation catalog:
//!
//! - a typed Rust API ([`solr::ItisClient`], [`taxonomy::TaxonomyExplorer`],
//!   the [`ops`] handlers),
//! - a command-line interface ([`cli`]),
//! - an MCP server with stdio and streamable-HTTP transports ([`mcp`]).
//!
//! # Example
//!
//! ```no_run
//! use itis_mcp::config::ItisConfig;
//! use itis_mcp::solr::{ItisClient, SearchSpec};
//!
//! # async fn run() -> itis_mcp::error::Result<()> {
//! let client = ItisClient::new(ItisConfig::default())?;
//! let page = client.search(&SearchSpec::by_scientific_name("Homo sapiens")).await?;
//! println!("{} matches", page.num_found);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod ops;
pub mod solr;
pub mod taxonomy;

pub use config::ItisConfig;
pub use error::{ItisError, Result};
pub use solr::{ItisClient, SearchPage, SearchSpec, TaxonRecord};
pub use taxonomy::{ExplorationLevel, TaxonomyExplorer};
