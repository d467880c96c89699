//! Operation catalog and dispatcher.
//!
//! Maps the fixed set of inbound operation names to typed handlers over
//! the SOLR gateway. Unknown names and invalid argument bags are rejected
//! at the parse boundary; every handler error is converted into an
//! error-flagged payload by [`dispatch_value`], so no single operation's
//! failure can take down the serving process.

pub mod params;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::{ItisError, Result};
use crate::solr::query::MAX_ROWS;
use crate::solr::{ItisClient, SearchPage, SearchSpec};
use crate::taxonomy::TaxonomyExplorer;
use crate::taxonomy::hierarchy::entries;

pub use params::{
    AutocompleteRequest, ExploreTaxonomyRequest, GetHierarchyRequest, GetStatisticsRequest,
    SearchByKingdomRequest, SearchByNameRequest, SearchByRankRequest, SearchByTsnRequest,
    SearchItisRequest,
};

/// A parsed operation: one variant per catalog entry, with its typed
/// arguments attached.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Raw SOLR search.
    Search(SearchItisRequest),
    /// Exact scientific-name search.
    SearchByName(SearchByNameRequest),
    /// TSN lookup.
    SearchByTsn(SearchByTsnRequest),
    /// Kingdom-filtered search.
    SearchByKingdom(SearchByKingdomRequest),
    /// Rank-filtered search.
    SearchByRank(SearchByRankRequest),
    /// Ancestry retrieval for one TSN.
    GetHierarchy(GetHierarchyRequest),
    /// Name-prefix completion.
    Autocomplete(AutocompleteRequest),
    /// Index-wide record count.
    GetStatistics(GetStatisticsRequest),
    /// Relative exploration from a resolved name.
    ExploreTaxonomy(ExploreTaxonomyRequest),
}

impl Operation {
    /// Every operation name in the catalog.
    pub const NAMES: [&'static str; 9] = [
        "search_itis",
        "search_by_scientific_name",
        "search_by_tsn",
        "search_by_kingdom",
        "search_by_rank",
        "get_hierarchy",
        "autocomplete_search",
        "get_statistics",
        "explore_taxonomy",
    ];

    /// The catalog name of this operation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Search(_) => "search_itis",
            Self::SearchByName(_) => "search_by_scientific_name",
            Self::SearchByTsn(_) => "search_by_tsn",
            Self::SearchByKingdom(_) => "search_by_kingdom",
            Self::SearchByRank(_) => "search_by_rank",
            Self::GetHierarchy(_) => "get_hierarchy",
            Self::Autocomplete(_) => "autocomplete_search",
            Self::GetStatistics(_) => "get_statistics",
            Self::ExploreTaxonomy(_) => "explore_taxonomy",
        }
    }

    /// Parses an operation name and argument bag into a typed operation.
    ///
    /// # Errors
    ///
    /// [`ItisError::UnknownOperation`] for a name outside the catalog;
    /// [`ItisError::MissingArgument`] when the arguments fail to
    /// deserialize into the operation's request struct.
    pub fn parse(name: &str, args: Value) -> Result<Self> {
        match name {
            "search_itis" => Ok(Self::Search(typed_args(name, args)?)),
            "search_by_scientific_name" => Ok(Self::SearchByName(typed_args(name, args)?)),
            "search_by_tsn" => Ok(Self::SearchByTsn(typed_args(name, args)?)),
            "search_by_kingdom" => Ok(Self::SearchByKingdom(typed_args(name, args)?)),
            "search_by_rank" => Ok(Self::SearchByRank(typed_args(name, args)?)),
            "get_hierarchy" => Ok(Self::GetHierarchy(typed_args(name, args)?)),
            "autocomplete_search" => Ok(Self::Autocomplete(typed_args(name, args)?)),
            "get_statistics" => Ok(Self::GetStatistics(typed_args(name, args)?)),
            "explore_taxonomy" => Ok(Self::ExploreTaxonomy(typed_args(name, args)?)),
            other => Err(ItisError::UnknownOperation {
                name: other.to_string(),
            }),
        }
    }
}

fn typed_args<T: DeserializeOwned>(operation: &str, args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| ItisError::MissingArgument {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

/// Executes a parsed operation, returning its success payload.
///
/// # Errors
///
/// Propagates the handler's [`ItisError`]; see [`dispatch_value`] for the
/// variant that converts errors into payloads.
pub async fn dispatch(client: &ItisClient, operation: Operation) -> Result<Value> {
    match operation {
        Operation::Search(req) => search_itis(client, req).await,
        Operation::SearchByName(req) => search_by_scientific_name(client, req).await,
        Operation::SearchByTsn(req) => search_by_tsn(client, req).await,
        Operation::SearchByKingdom(req) => search_by_kingdom(client, req).await,
        Operation::SearchByRank(req) => search_by_rank(client, req).await,
        Operation::GetHierarchy(req) => get_hierarchy(client, req).await,
        Operation::Autocomplete(req) => autocomplete_search(client, req).await,
        Operation::GetStatistics(req) => get_statistics(client, req).await,
        Operation::ExploreTaxonomy(req) => explore_taxonomy(client, req).await,
    }
}

/// Parses and executes an operation, converting every failure into an
/// error-flagged payload. This is the crash-proof entry point the serving
/// layers use: nothing propagates past here.
pub async fn dispatch_value(client: &ItisClient, name: &str, args: Value) -> Value {
    match Operation::parse(name, args) {
        Ok(operation) => match dispatch(client, operation).await {
            Ok(payload) => payload,
            Err(err) => err.to_payload(),
        },
        Err(err) => err.to_payload(),
    }
}

// ---------------------------------------------------------------------------
// Operation handlers
// ---------------------------------------------------------------------------

/// Caps a caller-supplied row count, leaving `None` to the builder default.
fn capped(rows: Option<u32>) -> Option<u32> {
    rows.map(|n| n.min(MAX_ROWS))
}

fn apply_paging(mut spec: SearchSpec, start: Option<u32>, rows: Option<u32>) -> SearchSpec {
    if let Some(start) = start {
        spec = spec.with_start(start);
    }
    if let Some(rows) = capped(rows) {
        spec = spec.with_rows(rows);
    }
    spec
}

/// Shapes the standard success payload: echoed request, counts, records.
fn page_payload(operation: &str, request: &impl Serialize, page: &SearchPage) -> Value {
    json!({
        "operation": operation,
        "request": request,
        "total_found": page.num_found,
        "start": page.start,
        "returned": page.docs.len(),
        "records": page.docs,
    })
}

/// Raw SOLR search with caller-supplied clause, filters, and projection.
pub async fn search_itis(client: &ItisClient, req: SearchItisRequest) -> Result<Value> {
    let mut spec = SearchSpec::new();
    if let Some(query) = &req.query {
        spec = spec.with_query(query.clone());
    }
    if let Some(sort) = &req.sort {
        spec = spec.with_sort(sort.clone());
    }
    if !req.fields.is_empty() {
        spec = spec.with_fields(req.fields.iter().cloned());
    }
    for (field, value) in &req.filters {
        spec = spec.with_filter(field.clone(), value.clone());
    }
    let spec = apply_paging(spec, req.start, req.rows);

    let page = client.search(&spec).await?;
    Ok(page_payload("search_itis", &req, &page))
}

/// Exact scientific-name search.
pub async fn search_by_scientific_name(
    client: &ItisClient,
    req: SearchByNameRequest,
) -> Result<Value> {
    let spec = apply_paging(SearchSpec::by_scientific_name(&req.name), req.start, req.rows);
    let page = client.search(&spec).await?;
    Ok(page_payload("search_by_scientific_name", &req, &page))
}

/// TSN lookup.
pub async fn search_by_tsn(client: &ItisClient, req: SearchByTsnRequest) -> Result<Value> {
    let page = client.search(&SearchSpec::by_tsn(&req.tsn)).await?;
    Ok(page_payload("search_by_tsn", &req, &page))
}

/// Kingdom-filtered search.
pub async fn search_by_kingdom(client: &ItisClient, req: SearchByKingdomRequest) -> Result<Value> {
    let spec = apply_paging(SearchSpec::by_kingdom(&req.kingdom), req.start, req.rows);
    let page = client.search(&spec).await?;
    Ok(page_payload("search_by_kingdom", &req, &page))
}

/// Rank-filtered search.
pub async fn search_by_rank(client: &ItisClient, req: SearchByRankRequest) -> Result<Value> {
    let spec = apply_paging(SearchSpec::by_rank(&req.rank), req.start, req.rows);
    let page = client.search(&spec).await?;
    Ok(page_payload("search_by_rank", &req, &page))
}

/// Ancestry retrieval: resolves one TSN and shapes its rank fields
/// kingdom-down, alongside the parsed hierarchy entries when present.
pub async fn get_hierarchy(client: &ItisClient, req: GetHierarchyRequest) -> Result<Value> {
    let page = client.search(&SearchSpec::hierarchy_of(&req.tsn)).await?;
    let record = page.docs.first().ok_or_else(|| ItisError::NotFound {
        name: req.tsn.clone(),
    })?;

    let parsed: Vec<Value> = record
        .hierarchy()
        .map(|h| {
            entries(h)
                .map(|e| json!({ "rank": e.label, "taxon": e.taxon }))
                .collect()
        })
        .unwrap_or_default();

    Ok(json!({
        "operation": "get_hierarchy",
        "request": req,
        "tsn": record.tsn,
        "name": record.name_w_ind,
        "rank": record.rank,
        "hierarchy": {
            "kingdom": record.kingdom,
            "phylum": record.phylum,
            "class": record.class_name,
            "order": record.order,
            "family": record.family,
            "genus": record.genus,
            "species": record.species,
        },
        "lineage": parsed,
    }))
}

/// Name-prefix completion, name-ascending.
pub async fn autocomplete_search(client: &ItisClient, req: AutocompleteRequest) -> Result<Value> {
    let mut spec = SearchSpec::autocomplete(&req.partial_name);
    if let Some(rows) = capped(req.rows) {
        spec = spec.with_rows(rows);
    }
    let page = client.search(&spec).await?;
    Ok(page_payload("autocomplete_search", &req, &page))
}

/// Index-wide record count. Requests zero rows; only the total matters.
pub async fn get_statistics(client: &ItisClient, _req: GetStatisticsRequest) -> Result<Value> {
    let page = client.search(&SearchSpec::statistics()).await?;
    Ok(json!({
        "operation": "get_statistics",
        "total_records": page.num_found,
    }))
}

/// Relative exploration: resolve, derive, execute, shape.
pub async fn explore_taxonomy(client: &ItisClient, req: ExploreTaxonomyRequest) -> Result<Value> {
    let result = TaxonomyExplorer::new(client)
        .explore(&req.scientific_name, req.level, req.rows)
        .await?;
    Ok(json!({
        "operation": "explore_taxonomy",
        "target": result.target,
        "level": result.level,
        "description": result.description,
        "relatives": result.relatives,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ItisConfig;

    fn offline_client() -> ItisClient {
        // Points at a closed port; parse-boundary tests never reach it.
        ItisClient::new(
            ItisConfig::builder()
                .base_url("http://127.0.0.1:9/")
                .build(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn test_every_catalog_name_parses() {
        let args = |name: &str| match name {
            "search_itis" | "get_statistics" => serde_json::json!({}),
            "search_by_scientific_name" => serde_json::json!({"name": "Homo sapiens"}),
            "search_by_tsn" | "get_hierarchy" => serde_json::json!({"tsn": "180092"}),
            "search_by_kingdom" => serde_json::json!({"kingdom": "Animalia"}),
            "search_by_rank" => serde_json::json!({"rank": "Species"}),
            "autocomplete_search" => serde_json::json!({"partial_name": "Quer"}),
            "explore_taxonomy" => {
                serde_json::json!({"scientific_name": "Homo sapiens", "level": "siblings"})
            }
            other => unreachable!("unexpected catalog name {other}"),
        };
        for name in Operation::NAMES {
            let operation = Operation::parse(name, args(name))
                .unwrap_or_else(|e| unreachable!("{name} failed to parse: {e}"));
            assert_eq!(operation.name(), name);
        }
    }

    #[test]
    fn test_unknown_operation_rejected_at_parse() {
        let err = match Operation::parse("frobnicate", serde_json::json!({})) {
            Err(err) => err,
            Ok(_) => unreachable!("parse accepted an unknown operation"),
        };
        assert!(matches!(err, ItisError::UnknownOperation { ref name } if name == "frobnicate"));
    }

    #[test]
    fn test_missing_required_argument_rejected() {
        let err = match Operation::parse("search_by_scientific_name", serde_json::json!({})) {
            Err(err) => err,
            Ok(_) => unreachable!("parse accepted empty arguments"),
        };
        match err {
            ItisError::MissingArgument { operation, message } => {
                assert_eq!(operation, "search_by_scientific_name");
                assert!(message.contains("name"));
            }
            other => unreachable!("expected MissingArgument, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_value_never_propagates_errors() {
        let client = offline_client();
        let payload = dispatch_value(&client, "no_such_operation", serde_json::json!({})).await;
        assert_eq!(payload["error"], serde_json::json!(true));
        assert_eq!(payload["kind"], serde_json::json!("unknown_operation"));
        assert_eq!(payload["operation"], serde_json::json!("no_such_operation"));
    }

    #[tokio::test]
    async fn test_dispatch_value_flags_missing_arguments() {
        let client = offline_client();
        let payload = dispatch_value(&client, "search_by_tsn", serde_json::json!({})).await;
        assert_eq!(payload["error"], serde_json::json!(true));
        assert_eq!(payload["kind"], serde_json::json!("missing_argument"));
    }

    #[test]
    fn test_capped_rows() {
        assert_eq!(capped(None), None);
        assert_eq!(capped(Some(5)), Some(5));
        assert_eq!(capped(Some(100_000)), Some(MAX_ROWS));
    }
}
