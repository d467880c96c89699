//! Response envelope and record types for the ITIS SOLR index.
//!
//! The envelope layout is fixed: `{ response: { numFound, start, docs } }`.
//! Records are immutable values produced fresh per remote call; callers
//! never mutate them and nothing is cached across calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level SOLR response envelope.
///
/// Facet and highlighting sections may accompany `response` on the wire;
/// they are ignored here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolrEnvelope {
    /// The result page.
    pub response: SearchPage,
}

/// One page of search results, exactly as returned by the index.
///
/// Record order is the index's order; nothing here re-sorts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchPage {
    /// Total number of matching records in the index.
    #[serde(rename = "numFound")]
    pub num_found: u64,
    /// Offset of the first returned record.
    #[serde(default)]
    pub start: u64,
    /// The returned records.
    #[serde(default)]
    pub docs: Vec<TaxonRecord>,
}

/// A single taxonomic record.
///
/// All documented ITIS fields are optional on the wire; anything not
/// modeled explicitly lands in `extra` so field projections round-trip.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonRecord {
    /// Taxonomic serial number, the record's unique identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsn: Option<String>,
    /// Scientific name with indicators, the display-name field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_w_ind: Option<String>,
    /// Kingdom name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kingdom: Option<String>,
    /// Phylum or division name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phylum: Option<String>,
    /// Class name.
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Order name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Genus name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,
    /// Species epithet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    /// Taxon author attribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Taxonomic rank of this record (e.g. `"Species"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    /// Usage status (`"valid"`, `"invalid"`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// Credibility rating of the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credibility_rating: Option<String>,
    /// Ancestor hierarchy, a list holding one `Kingdom:X$Phylum:Y$...`
    /// string. Parsed by [`crate::taxonomy::hierarchy`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy_so_far_w_ranks: Option<Vec<String>>,
    /// Any additional projected fields, preserved as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl TaxonRecord {
    /// Returns the record's hierarchy string, if the index supplied one.
    #[must_use]
    pub fn hierarchy(&self) -> Option<&str> {
        self.hierarchy_so_far_w_ranks
            .as_ref()?
            .first()
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_doc() -> Value {
        json!({
            "tsn": "180092",
            "nameWInd": "Homo sapiens",
            "kingdom": "Animalia",
            "class": "Mammalia",
            "genus": "Homo",
            "rank": "Species",
            "hierarchySoFarWRanks": [
                "Kingdom:Animalia$Phylum:Chordata$Class:Mammalia$Order:Primates$Family:Hominidae$Genus:Homo$Species:Homo sapiens"
            ],
            "phyloSort": "001002003"
        })
    }

    #[test]
    fn test_record_decodes_documented_fields() {
        let record: TaxonRecord =
            serde_json::from_value(sample_doc()).unwrap_or_default();
        assert_eq!(record.tsn.as_deref(), Some("180092"));
        assert_eq!(record.name_w_ind.as_deref(), Some("Homo sapiens"));
        assert_eq!(record.class_name.as_deref(), Some("Mammalia"));
        assert_eq!(record.genus.as_deref(), Some("Homo"));
    }

    #[test]
    fn test_unmodeled_fields_flattened_into_extra() {
        let record: TaxonRecord =
            serde_json::from_value(sample_doc()).unwrap_or_default();
        assert_eq!(record.extra.get("phyloSort"), Some(&json!("001002003")));
    }

    #[test]
    fn test_hierarchy_accessor() {
        let record: TaxonRecord =
            serde_json::from_value(sample_doc()).unwrap_or_default();
        let hierarchy = record.hierarchy().unwrap_or_default();
        assert!(hierarchy.starts_with("Kingdom:Animalia"));

        let empty = TaxonRecord::default();
        assert_eq!(empty.hierarchy(), None);
    }

    #[test]
    fn test_envelope_decodes() {
        let envelope: SolrEnvelope = serde_json::from_value(json!({
            "response": { "numFound": 2, "start": 0, "docs": [sample_doc()] },
            "facet_counts": {}
        }))
        .unwrap_or_else(|_| SolrEnvelope {
            response: SearchPage { num_found: 0, start: 0, docs: Vec::new() },
        });
        assert_eq!(envelope.response.num_found, 2);
        assert_eq!(envelope.response.docs.len(), 1);
    }
}
