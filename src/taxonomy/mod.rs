//! Taxonomic interpretation layer.
//!
//! [`hierarchy`] parses the index's semi-structured ancestor-hierarchy wire
//! format and escapes extracted values for reuse in new queries;
//! [`explorer`] drives the two-step resolve-then-relate exploration
//! algorithm on top of the SOLR gateway.

pub mod explorer;
pub mod hierarchy;

pub use explorer::{
    ExplorationLevel, ExplorationResult, Relative, RelativeSet, TaxonSummary, TaxonomyExplorer,
};
pub use hierarchy::{escape_query_value, extract_rank};
