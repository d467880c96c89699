//! Typed request structs for the operation catalog.
//!
//! One struct per operation, validated at the dispatch boundary by serde.
//! `schemars` derives double as the MCP tool input schemas, so the same
//! types serve both the dispatcher and the protocol surface.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::taxonomy::ExplorationLevel;

/// Parameters for the `search_itis` operation: a raw SOLR search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchItisRequest {
    /// SOLR query clause, e.g. `nameWInd:*tiger* AND kingdom:Animalia`.
    /// Defaults to matching all records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Result offset for pagination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,

    /// Maximum rows to return (default 10, capped at 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,

    /// Sort clause, `"<field> asc|desc"`, e.g. `nameWInd asc`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Field names to project, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    /// Exact-match filter clauses, field name to literal value. Each entry
    /// narrows the result set independently.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
}

/// Parameters for `search_by_scientific_name`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchByNameRequest {
    /// Scientific name to match exactly, e.g. `Homo sapiens`.
    pub name: String,

    /// Result offset for pagination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,

    /// Maximum rows to return (default 10, capped at 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

/// Parameters for `search_by_tsn`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchByTsnRequest {
    /// Taxonomic serial number to look up, e.g. `180092`.
    pub tsn: String,
}

/// Parameters for `search_by_kingdom`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchByKingdomRequest {
    /// Kingdom name, e.g. `Animalia` or `Plantae`.
    pub kingdom: String,

    /// Result offset for pagination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,

    /// Maximum rows to return (default 10, capped at 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

/// Parameters for `search_by_rank`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchByRankRequest {
    /// Taxonomic rank name, e.g. `Species`, `Genus`, `Family`.
    pub rank: String,

    /// Result offset for pagination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,

    /// Maximum rows to return (default 10, capped at 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

/// Parameters for `get_hierarchy`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetHierarchyRequest {
    /// Taxonomic serial number of the record whose ancestry to retrieve.
    pub tsn: String,
}

/// Parameters for `autocomplete_search`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AutocompleteRequest {
    /// Name prefix to complete, e.g. `Quer` for oaks.
    pub partial_name: String,

    /// Maximum suggestions to return (default 10, capped at 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

/// Parameters for `get_statistics` (none).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetStatisticsRequest {}

/// Parameters for `explore_taxonomy`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExploreTaxonomyRequest {
    /// Scientific name of the organism to explore from.
    pub scientific_name: String,

    /// Comparison scope: `siblings`, `family`, `order`, or `class`.
    pub level: ExplorationLevel,

    /// Maximum relatives to return (default 10, capped at 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}
