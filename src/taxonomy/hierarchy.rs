//! Parser for the `hierarchySoFarWRanks` wire format.
//!
//! The remote index encodes a record's ancestry as a single string with an
//! explicit little grammar:
//!
//! ```text
//! hierarchy = entry (RANK_SEPARATOR entry)*
//! entry     = label LABEL_SEPARATOR taxon
//! ```
//!
//! e.g. `Kingdom:Animalia$Phylum:Chordata$Class:Mammalia`. The field is
//! treated as an opaque wire format: segments that do not match the entry
//! grammar are unrepresentable as [`RankEntry`] values and therefore can
//! never satisfy a lookup, so malformed input fails predictably instead of
//! silently mismatching. An absent label is a legitimate outcome (`None`),
//! not an error.

/// Separator between rank entries.
pub const RANK_SEPARATOR: char = '$';
/// Separator joining a rank label to its taxon name.
pub const LABEL_SEPARATOR: char = ':';

/// One well-formed `label:taxon` entry of a hierarchy string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankEntry<'a> {
    /// Rank label, e.g. `"Family"`.
    pub label: &'a str,
    /// Taxon name at that rank.
    pub taxon: &'a str,
}

/// Iterates the well-formed entries of a hierarchy string.
///
/// Segments without a label separator, and segments with an empty label or
/// taxon, are skipped; they cannot match any rank lookup.
pub fn entries(hierarchy: &str) -> impl Iterator<Item = RankEntry<'_>> {
    hierarchy.split(RANK_SEPARATOR).filter_map(|segment| {
        let (label, taxon) = segment.split_once(LABEL_SEPARATOR)?;
        if label.is_empty() || taxon.is_empty() {
            return None;
        }
        Some(RankEntry { label, taxon })
    })
}

/// Extracts the taxon name at the given rank label.
///
/// The label match is exact and case-sensitive (`"Family"`, not
/// `"family"`). Returns `None` when the label is absent or the hierarchy
/// string is empty.
#[must_use]
pub fn extract_rank<'a>(hierarchy: &'a str, label: &str) -> Option<&'a str> {
    entries(hierarchy)
        .find(|entry| entry.label == label)
        .map(|entry| entry.taxon)
}

/// Escapes a value for literal use inside a SOLR query clause.
///
/// Every character with special meaning in the query syntax is prefixed
/// with a backslash. Whitespace is escaped too because derived clauses are
/// spliced into unquoted wildcard expressions.
#[must_use]
pub fn escape_query_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if is_special(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Characters reserved by the SOLR query syntax. `&` and `|` are only
/// special doubled, but escaping the single character is always safe.
fn is_special(ch: char) -> bool {
    matches!(
        ch,
        '+' | '-'
            | '!'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | '^'
            | '"'
            | '~'
            | '*'
            | '?'
            | ':'
            | '\\'
            | '/'
            | '&'
            | '|'
    ) || ch.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    const MAMMAL: &str = "Kingdom:Animalia$Phylum:Chordata$Class:Mammalia";

    #[test_case(MAMMAL, "Class", Some("Mammalia"); "present rank")]
    #[test_case(MAMMAL, "Kingdom", Some("Animalia"); "first rank")]
    #[test_case(MAMMAL, "Genus", None; "absent rank")]
    #[test_case(MAMMAL, "class", None; "label match is case sensitive")]
    #[test_case("", "Class", None; "empty hierarchy")]
    #[test_case("no separators here", "Class", None; "unstructured input")]
    fn test_extract_rank(hierarchy: &str, label: &str, expected: Option<&str>) {
        assert_eq!(extract_rank(hierarchy, label), expected);
    }

    #[test]
    fn test_taxon_may_contain_label_separator() {
        // Split happens at the first separator only.
        assert_eq!(extract_rank("Rank:a:b", "Rank"), Some("a:b"));
    }

    #[test]
    fn test_malformed_segments_are_skipped() {
        let entries: Vec<RankEntry<'_>> =
            entries("Kingdom:Animalia$garbage$:NoLabel$Empty:$Class:Mammalia").collect();
        assert_eq!(
            entries,
            vec![
                RankEntry { label: "Kingdom", taxon: "Animalia" },
                RankEntry { label: "Class", taxon: "Mammalia" },
            ]
        );
    }

    #[test_case("Mammalia", "Mammalia"; "plain value untouched")]
    #[test_case("Homo sapiens", "Homo\\ sapiens"; "space escaped")]
    #[test_case("a:b", "a\\:b"; "colon escaped")]
    #[test_case("x*y?", "x\\*y\\?"; "wildcards escaped")]
    #[test_case("a\\b", "a\\\\b"; "backslash escaped")]
    fn test_escape_query_value(input: &str, expected: &str) {
        assert_eq!(escape_query_value(input), expected);
    }

    proptest! {
        // Every special character in the escaped output must be preceded
        // by a backslash.
        #[test]
        fn prop_escaped_output_has_no_unescaped_specials(value in ".*") {
            let escaped = escape_query_value(&value);
            let mut chars = escaped.chars();
            while let Some(ch) = chars.next() {
                if ch == '\\' {
                    // Consumes the escaped character, whatever it is.
                    let _ = chars.next();
                    continue;
                }
                prop_assert!(!is_special(ch), "unescaped special {ch:?} in {escaped:?}");
            }
        }

        #[test]
        fn prop_extract_finds_inserted_rank(
            taxon in "[A-Za-z ]{1,20}",
            label in "[A-Za-z]{1,10}",
        ) {
            let hierarchy = format!("Kingdom:Animalia{RANK_SEPARATOR}{label}{LABEL_SEPARATOR}{taxon}");
            // "Kingdom" may collide with the generated label; skip that case.
            prop_assume!(label != "Kingdom");
            prop_assert_eq!(extract_rank(&hierarchy, &label), Some(taxon.as_str()));
        }
    }
}
