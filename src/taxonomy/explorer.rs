//! Taxonomic relative exploration.
//!
//! Resolves a scientific name to its first matching record, derives a
//! related-record query for the requested exploration level (same genus,
//! family, order, or class), executes it, and shapes a comparison result.
//! The two network calls are strictly sequential: the second query is
//! derived from the first's result.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ItisError, Result};
use crate::solr::query::{
    DEFAULT_ROWS, HIERARCHY_FIELD, MAX_ROWS, SCIENTIFIC_NAME_FIELD, SORT_NAME_ASC, TSN_FIELD,
    quote,
};
use crate::solr::{ItisClient, SearchPage, SearchSpec, TaxonRecord};

use super::hierarchy::{escape_query_value, extract_rank};

/// The supported comparison scopes for finding relatives of a resolved
/// record. A closed enumeration, not an open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExplorationLevel {
    /// Other species in the same genus.
    Siblings,
    /// Species sharing the target's family.
    Family,
    /// Species sharing the target's order.
    Order,
    /// Species sharing the target's class.
    Class,
}

impl ExplorationLevel {
    /// All levels, in scope order from narrowest to broadest.
    pub const ALL: [Self; 4] = [Self::Siblings, Self::Family, Self::Order, Self::Class];

    /// The hierarchy rank label this level extracts, or `None` for
    /// sibling exploration (which uses the record's genus field instead).
    #[must_use]
    pub const fn rank_label(self) -> Option<&'static str> {
        match self {
            Self::Siblings => None,
            Self::Family => Some("Family"),
            Self::Order => Some("Order"),
            Self::Class => Some("Class"),
        }
    }

    /// Lowercase wire name of this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Siblings => "siblings",
            Self::Family => "family",
            Self::Order => "order",
            Self::Class => "class",
        }
    }
}

impl fmt::Display for ExplorationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExplorationLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "siblings" => Ok(Self::Siblings),
            "family" => Ok(Self::Family),
            "order" => Ok(Self::Order),
            "class" => Ok(Self::Class),
            other => Err(format!(
                "unknown exploration level \"{other}\" (expected siblings, family, order, or class)"
            )),
        }
    }
}

/// Identity projection of a resolved record: name, identifier, rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonSummary {
    /// Taxonomic serial number.
    pub tsn: Option<String>,
    /// Scientific display name.
    pub name: Option<String>,
    /// Taxonomic rank.
    pub rank: Option<String>,
}

impl TaxonSummary {
    /// Projects a full record down to its identity fields.
    #[must_use]
    pub fn from_record(record: &TaxonRecord) -> Self {
        Self {
            tsn: record.tsn.clone(),
            name: record.name_w_ind.clone(),
            rank: record.rank.clone(),
        }
    }
}

impl fmt::Display for TaxonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("<unnamed record>");
        match &self.tsn {
            Some(tsn) => write!(f, "record for \"{name}\" (TSN {tsn})"),
            None => write!(f, "record for \"{name}\""),
        }
    }
}

/// One related record, projected for the comparison list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relative {
    /// Taxonomic serial number.
    pub tsn: Option<String>,
    /// Scientific display name.
    pub name: Option<String>,
    /// Kingdom name.
    pub kingdom: Option<String>,
    /// Taxonomic rank.
    pub rank: Option<String>,
}

impl Relative {
    fn from_record(record: &TaxonRecord) -> Self {
        Self {
            tsn: record.tsn.clone(),
            name: record.name_w_ind.clone(),
            kingdom: record.kingdom.clone(),
            rank: record.rank.clone(),
        }
    }
}

/// The related-record page, projected to comparison fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativeSet {
    /// Total matching relatives in the index.
    pub total_found: u64,
    /// Offset of the first returned relative.
    pub start: u64,
    /// The returned relatives, name-ascending.
    pub records: Vec<Relative>,
}

impl RelativeSet {
    fn from_page(page: &SearchPage) -> Self {
        Self {
            total_found: page.num_found,
            start: page.start,
            records: page.docs.iter().map(Relative::from_record).collect(),
        }
    }
}

/// Result of one exploration: the resolved target paired with its
/// relatives at the requested level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationResult {
    /// Identity of the record the name resolved to.
    pub target: TaxonSummary,
    /// The exploration level that was applied.
    pub level: ExplorationLevel,
    /// Human-readable description of the shared group.
    pub description: String,
    /// The related records.
    pub relatives: RelativeSet,
}

/// Drives the resolve-then-relate exploration algorithm over a gateway.
#[derive(Debug, Clone, Copy)]
pub struct TaxonomyExplorer<'a> {
    client: &'a ItisClient,
}

impl<'a> TaxonomyExplorer<'a> {
    /// Creates an explorer over the given client.
    #[must_use]
    pub const fn new(client: &'a ItisClient) -> Self {
        Self { client }
    }

    /// Finds relatives of `scientific_name` at the given level.
    ///
    /// Related records are always returned name-ascending regardless of
    /// any caller preference; the purpose is a readable comparison list,
    /// not relevance ranking. `rows` defaults to 10 and is capped at
    /// [`MAX_ROWS`].
    ///
    /// # Errors
    ///
    /// [`ItisError::NotFound`] when the name resolves to zero records;
    /// [`ItisError::IncompleteData`] when the resolved record lacks the
    /// genus or hierarchy data the level requires; any gateway error from
    /// the two underlying searches.
    pub async fn explore(
        &self,
        scientific_name: &str,
        level: ExplorationLevel,
        rows: Option<u32>,
    ) -> Result<ExplorationResult> {
        let resolved = self
            .client
            .search(&SearchSpec::by_scientific_name(scientific_name).with_rows(1))
            .await?;
        let Some(target) = resolved.docs.first() else {
            return Err(ItisError::NotFound {
                name: scientific_name.to_string(),
            });
        };

        let (query, description) = derive_relative_query(target, level)?;
        debug!(level = %level, query = %query, "derived exploration query");

        let spec = SearchSpec::new()
            .with_query(query)
            .with_rows(rows.unwrap_or(DEFAULT_ROWS).min(MAX_ROWS))
            .with_sort(SORT_NAME_ASC)
            .with_fields([TSN_FIELD, SCIENTIFIC_NAME_FIELD, "kingdom", "rank"]);
        let page = self.client.search(&spec).await?;

        Ok(ExplorationResult {
            target: TaxonSummary::from_record(target),
            level,
            description,
            relatives: RelativeSet::from_page(&page),
        })
    }
}

/// Derives the related-record query and its description from a resolved
/// target.
///
/// Siblings use the genus field; family/order/class extract the rank from
/// the hierarchy string and match the full `Label:taxon` token (escaped)
/// inside it, so one taxon name being a substring of another cannot cause
/// a false match.
fn derive_relative_query(
    target: &TaxonRecord,
    level: ExplorationLevel,
) -> Result<(String, String)> {
    let incomplete = || ItisError::IncompleteData {
        level,
        target: TaxonSummary::from_record(target),
    };

    match level.rank_label() {
        None => {
            let genus = target
                .genus
                .as_deref()
                .filter(|g| !g.is_empty())
                .ok_or_else(incomplete)?;
            Ok((
                format!("genus:{} AND rank:Species", quote(genus)),
                format!("Species in genus {genus}"),
            ))
        }
        Some(label) => {
            let taxon = target
                .hierarchy()
                .and_then(|h| extract_rank(h, label))
                .ok_or_else(incomplete)?;
            Ok((
                format!(
                    "{HIERARCHY_FIELD}:*{label}\\:{}* AND rank:Species",
                    escape_query_value(taxon)
                ),
                format!("Species in {level} {taxon}"),
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn target_with_hierarchy() -> TaxonRecord {
        TaxonRecord {
            tsn: Some("180092".to_string()),
            name_w_ind: Some("Homo sapiens".to_string()),
            genus: Some("Homo".to_string()),
            rank: Some("Species".to_string()),
            hierarchy_so_far_w_ranks: Some(vec![
                "Kingdom:Animalia$Phylum:Chordata$Class:Mammalia$Order:Primates$Family:Hominidae$Genus:Homo$Species:Homo sapiens"
                    .to_string(),
            ]),
            ..TaxonRecord::default()
        }
    }

    #[test]
    fn test_siblings_query_uses_genus() {
        let (query, description) =
            derive_relative_query(&target_with_hierarchy(), ExplorationLevel::Siblings)
                .unwrap_or_else(|_| unreachable!());
        assert_eq!(query, "genus:\"Homo\" AND rank:Species");
        assert_eq!(description, "Species in genus Homo");
    }

    #[test_case(ExplorationLevel::Family, "Family\\:Hominidae"; "family token")]
    #[test_case(ExplorationLevel::Order, "Order\\:Primates"; "order token")]
    #[test_case(ExplorationLevel::Class, "Class\\:Mammalia"; "class token")]
    fn test_rank_levels_match_full_token(level: ExplorationLevel, token: &str) {
        let (query, _) = derive_relative_query(&target_with_hierarchy(), level)
            .unwrap_or_else(|_| unreachable!());
        assert!(query.contains(token), "{token} not in {query}");
        assert!(query.ends_with("AND rank:Species"));
        assert!(query.starts_with("hierarchySoFarWRanks:*"));
    }

    #[test]
    fn test_extracted_taxon_is_escaped() {
        let mut target = target_with_hierarchy();
        target.hierarchy_so_far_w_ranks =
            Some(vec!["Family:Deep Sea Family".to_string()]);
        let (query, _) = derive_relative_query(&target, ExplorationLevel::Family)
            .unwrap_or_else(|_| unreachable!());
        assert!(query.contains("Family\\:Deep\\ Sea\\ Family"));
    }

    #[test]
    fn test_missing_genus_is_incomplete_data() {
        let mut target = target_with_hierarchy();
        target.genus = None;
        let err = derive_relative_query(&target, ExplorationLevel::Siblings)
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(
            err,
            ItisError::IncompleteData { level: ExplorationLevel::Siblings, .. }
        ));
    }

    #[test]
    fn test_missing_hierarchy_attaches_partial_target() {
        let mut target = target_with_hierarchy();
        target.hierarchy_so_far_w_ranks = None;
        let err = derive_relative_query(&target, ExplorationLevel::Order)
            .map(|_| ())
            .unwrap_err();
        match err {
            ItisError::IncompleteData { target, .. } => {
                assert_eq!(target.tsn.as_deref(), Some("180092"));
                assert_eq!(target.name.as_deref(), Some("Homo sapiens"));
            }
            other => unreachable!("expected IncompleteData, got {other:?}"),
        }
    }

    #[test_case("siblings", ExplorationLevel::Siblings)]
    #[test_case("family", ExplorationLevel::Family)]
    #[test_case("order", ExplorationLevel::Order)]
    #[test_case("class", ExplorationLevel::Class)]
    fn test_level_round_trips_from_str(input: &str, expected: ExplorationLevel) {
        assert_eq!(input.parse::<ExplorationLevel>().ok(), Some(expected));
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = "phylum".parse::<ExplorationLevel>().unwrap_err();
        assert!(err.contains("phylum"));
    }

    #[test]
    fn test_level_serde_is_lowercase() {
        let json = serde_json::to_string(&ExplorationLevel::Family).unwrap_or_default();
        assert_eq!(json, "\"family\"");
        let parsed: ExplorationLevel =
            serde_json::from_str("\"class\"").unwrap_or(ExplorationLevel::Siblings);
        assert_eq!(parsed, ExplorationLevel::Class);
    }
}
