//! SOLR query construction.
//!
//! [`SearchSpec`] is a structured search specification rendered into the
//! canonical ordered parameter list the ITIS SOLR endpoint expects. The
//! rendering rules are load-bearing for compatibility with the remote
//! index: output format is always JSON/indented, an absent query clause is
//! replaced by the match-all wildcard (never emitted empty), `rows` is
//! always sent (default 10) while `start` is only sent when explicitly set,
//! and each filter pair becomes one independent `fq` narrowing clause.

use crate::taxonomy::hierarchy::escape_query_value;

/// SOLR clause matching every record in the index.
pub const WILDCARD_QUERY: &str = "*:*";
/// Rows returned when a spec does not set an explicit row count.
pub const DEFAULT_ROWS: u32 = 10;
/// Upper bound applied to caller-supplied row counts at the operation layer.
pub const MAX_ROWS: u32 = 100;

/// Display-name field (scientific name with indicators).
pub const SCIENTIFIC_NAME_FIELD: &str = "nameWInd";
/// Taxonomic serial number field.
pub const TSN_FIELD: &str = "tsn";
/// Semi-structured ancestor-hierarchy field (`Kingdom:X$Phylum:Y$...`).
pub const HIERARCHY_FIELD: &str = "hierarchySoFarWRanks";
/// Sort clause producing a readable name-ascending listing.
pub const SORT_NAME_ASC: &str = "nameWInd asc";

/// Fields projected by hierarchy lookups, kingdom down to species.
const HIERARCHY_PROJECTION: [&str; 11] = [
    "tsn",
    "nameWInd",
    "kingdom",
    "phylum",
    "class",
    "order",
    "family",
    "genus",
    "species",
    "rank",
    "phyloSort",
];

/// A structured search specification for the ITIS SOLR endpoint.
///
/// Constructed per call and discarded after use. Filters are kept as an
/// order-preserving list of `(field, value)` pairs because the rendered
/// `fq` clause order is observable on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSpec {
    /// Free-text SOLR query clause; `None` renders the match-all wildcard.
    pub query: Option<String>,
    /// Result offset. Omitted from the parameter set when unset, letting
    /// the remote service apply its own default of 0.
    pub start: Option<u32>,
    /// Maximum rows to return; rendered as [`DEFAULT_ROWS`] when unset.
    pub rows: Option<u32>,
    /// Sort clause, `"<field> asc|desc"`, emitted verbatim when set.
    pub sort: Option<String>,
    /// Field projection, comma-joined in caller order when non-empty.
    pub fields: Vec<String>,
    /// Exact-match filter clauses, one `fq` per pair, in insertion order.
    pub filters: Vec<(String, String)>,
}

impl SearchSpec {
    /// Creates an empty spec (match-all query, default pagination).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text query clause.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the result offset.
    #[must_use]
    pub const fn with_start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the row count.
    #[must_use]
    pub const fn with_rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Sets the sort clause.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets the field projection.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Appends one exact-match filter clause.
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Exact search on the scientific display name, quoted as a phrase.
    #[must_use]
    pub fn by_scientific_name(name: &str) -> Self {
        Self::new().with_query(format!("{SCIENTIFIC_NAME_FIELD}:{}", quote(name)))
    }

    /// Exact search on the taxonomic serial number.
    #[must_use]
    pub fn by_tsn(tsn: &str) -> Self {
        Self::new().with_query(format!("{TSN_FIELD}:{tsn}"))
    }

    /// Match-all search narrowed to one kingdom via a quoted filter clause.
    #[must_use]
    pub fn by_kingdom(kingdom: &str) -> Self {
        Self::new().with_filter("kingdom", quote(kingdom))
    }

    /// Match-all search narrowed to one taxonomic rank via a quoted filter clause.
    #[must_use]
    pub fn by_rank(rank: &str) -> Self {
        Self::new().with_filter("rank", quote(rank))
    }

    /// TSN lookup projected to the ancestor-rank fields, for hierarchy display.
    #[must_use]
    pub fn hierarchy_of(tsn: &str) -> Self {
        Self::by_tsn(tsn).with_fields(HIERARCHY_PROJECTION)
    }

    /// Prefix search over display names, name-ascending.
    ///
    /// The prefix is escaped before the wildcard suffix is appended so
    /// embedded query metacharacters (including spaces) stay literal.
    #[must_use]
    pub fn autocomplete(partial_name: &str) -> Self {
        Self::new()
            .with_query(format!(
                "{SCIENTIFIC_NAME_FIELD}:{}*",
                escape_query_value(partial_name)
            ))
            .with_sort(SORT_NAME_ASC)
    }

    /// Index-wide statistics request: match-all, zero rows, `tsn` only.
    ///
    /// Callers read the returned total count; record content is irrelevant.
    #[must_use]
    pub fn statistics() -> Self {
        Self::new().with_rows(0).with_fields([TSN_FIELD])
    }

    /// Renders the canonical ordered parameter list for URL encoding.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = vec![
            ("wt", "json".to_string()),
            ("indent", "true".to_string()),
        ];

        match &self.query {
            Some(query) => params.push(("q", query.clone())),
            None => params.push(("q", WILDCARD_QUERY.to_string())),
        }

        if let Some(start) = self.start {
            params.push(("start", start.to_string()));
        }
        params.push(("rows", self.rows.unwrap_or(DEFAULT_ROWS).to_string()));

        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }
        if !self.fields.is_empty() {
            params.push(("fl", self.fields.join(",")));
        }
        for (field, value) in &self.filters {
            params.push(("fq", format!("{field}:{value}")));
        }

        params
    }
}

/// Wraps a value in double quotes for use as a SOLR phrase, escaping any
/// embedded backslashes and quotes.
#[must_use]
pub fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_empty_spec_renders_wildcard_query() {
        let params = SearchSpec::new().to_params();
        assert_eq!(param(&params, "q"), Some(WILDCARD_QUERY));
    }

    #[test]
    fn test_output_format_is_fixed() {
        let params = SearchSpec::new().to_params();
        assert_eq!(params[0], ("wt", "json".to_string()));
        assert_eq!(params[1], ("indent", "true".to_string()));
    }

    #[test]
    fn test_rows_defaults_to_ten() {
        let params = SearchSpec::new().to_params();
        assert_eq!(param(&params, "rows"), Some("10"));
    }

    #[test]
    fn test_explicit_rows_rendered_verbatim() {
        let params = SearchSpec::new().with_rows(0).to_params();
        assert_eq!(param(&params, "rows"), Some("0"));
        let params = SearchSpec::new().with_rows(37).to_params();
        assert_eq!(param(&params, "rows"), Some("37"));
    }

    #[test]
    fn test_start_omitted_unless_set() {
        let params = SearchSpec::new().to_params();
        assert_eq!(param(&params, "start"), None);
        let params = SearchSpec::new().with_start(20).to_params();
        assert_eq!(param(&params, "start"), Some("20"));
    }

    #[test]
    fn test_fields_joined_in_caller_order() {
        let params = SearchSpec::new()
            .with_fields(["tsn", "nameWInd", "kingdom"])
            .to_params();
        assert_eq!(param(&params, "fl"), Some("tsn,nameWInd,kingdom"));
    }

    #[test]
    fn test_empty_fields_omitted() {
        let params = SearchSpec::new().to_params();
        assert_eq!(param(&params, "fl"), None);
    }

    #[test]
    fn test_one_filter_clause_per_entry() {
        let params = SearchSpec::new()
            .with_filter("kingdom", "\"Animalia\"")
            .with_filter("rank", "\"Species\"")
            .to_params();
        let clauses: Vec<&str> = params
            .iter()
            .filter(|(k, _)| *k == "fq")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(clauses, vec!["kingdom:\"Animalia\"", "rank:\"Species\""]);
    }

    #[test]
    fn test_by_scientific_name_quotes_phrase() {
        let spec = SearchSpec::by_scientific_name("Homo sapiens");
        assert_eq!(spec.query.as_deref(), Some("nameWInd:\"Homo sapiens\""));
    }

    #[test]
    fn test_by_tsn_is_exact_clause() {
        let spec = SearchSpec::by_tsn("180092");
        assert_eq!(spec.query.as_deref(), Some("tsn:180092"));
    }

    #[test]
    fn test_by_kingdom_adds_quoted_filter() {
        let spec = SearchSpec::by_kingdom("Animalia");
        assert_eq!(
            spec.filters,
            vec![("kingdom".to_string(), "\"Animalia\"".to_string())]
        );
        assert!(spec.query.is_none());
    }

    #[test]
    fn test_autocomplete_escapes_and_sorts() {
        let spec = SearchSpec::autocomplete("Homo sa");
        assert_eq!(spec.query.as_deref(), Some("nameWInd:Homo\\ sa*"));
        assert_eq!(spec.sort.as_deref(), Some(SORT_NAME_ASC));
    }

    #[test]
    fn test_statistics_requests_zero_rows_match_all() {
        let params = SearchSpec::statistics().to_params();
        assert_eq!(param(&params, "q"), Some(WILDCARD_QUERY));
        assert_eq!(param(&params, "rows"), Some("0"));
        assert_eq!(param(&params, "fl"), Some("tsn"));
    }

    #[test]
    fn test_quote_escapes_embedded_quotes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a \"b\""), "\"a \\\"b\\\"\"");
    }
}
