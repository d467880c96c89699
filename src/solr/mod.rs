//! ITIS SOLR protocol layer.
//!
//! Covers the wire-facing half of the crate: building canonical SOLR
//! parameter sets ([`query`]), decoding the response envelope ([`record`]),
//! and executing single HTTP GETs against the index ([`client`]). Nothing
//! here interprets taxonomy; that lives in [`crate::taxonomy`].

pub mod client;
pub mod query;
pub mod record;

pub use client::ItisClient;
pub use query::SearchSpec;
pub use record::{SearchPage, SolrEnvelope, TaxonRecord};
