//! Output formatting for CLI results.
//!
//! Text rendering works over the same JSON payloads the operation
//! handlers produce, so the CLI and MCP surfaces stay in lockstep.

use std::fmt::Write as FmtWrite;

use serde_json::Value;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables.
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Parses a format name, defaulting to text for unknown values.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Serializes a payload as pretty JSON with a trailing newline.
    #[must_use]
    pub fn to_json(self, value: &Value) -> String {
        let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
        out.push('\n');
        out
    }
}

fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("-")
}

/// Renders a search payload: header line plus one row per record.
#[must_use]
pub fn format_page(payload: &Value, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return format.to_json(payload);
    }

    let total = payload["total_found"].as_u64().unwrap_or(0);
    let records = payload["records"].as_array().cloned().unwrap_or_default();

    if records.is_empty() {
        return format!("No records found ({total} total matches).\n");
    }

    let mut out = String::new();
    let _ = writeln!(out, "Found {total} records (showing {}):\n", records.len());
    let _ = writeln!(
        out,
        "{:<10} {:<40} {:<14} {:<12}",
        "TSN", "Scientific name", "Rank", "Kingdom"
    );
    out.push_str(&"-".repeat(78));
    out.push('\n');

    for record in &records {
        let _ = writeln!(
            out,
            "{:<10} {:<40} {:<14} {:<12}",
            field(record, "tsn"),
            field(record, "nameWInd"),
            field(record, "rank"),
            field(record, "kingdom"),
        );
    }
    out
}

/// Renders a hierarchy payload as an indented lineage.
#[must_use]
pub fn format_hierarchy(payload: &Value, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return format.to_json(payload);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (TSN {}, {})\n",
        field(payload, "name"),
        field(payload, "tsn"),
        field(payload, "rank"),
    );

    let lineage = payload["lineage"].as_array().cloned().unwrap_or_default();
    if lineage.is_empty() {
        // Fall back to the flat rank fields when no lineage string came back.
        for rank in ["kingdom", "phylum", "class", "order", "family", "genus", "species"] {
            if let Some(taxon) = payload["hierarchy"].get(rank).and_then(Value::as_str) {
                let _ = writeln!(out, "  {rank}: {taxon}");
            }
        }
    } else {
        for (depth, entry) in lineage.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}{}: {}",
                "  ".repeat(depth + 1),
                field(entry, "rank"),
                field(entry, "taxon"),
            );
        }
    }
    out
}

/// Renders the statistics payload.
#[must_use]
pub fn format_statistics(payload: &Value, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return format.to_json(payload);
    }
    let total = payload["total_records"].as_u64().unwrap_or(0);
    format!("Total taxonomic records: {total}\n")
}

/// Renders an exploration payload: target, description, relatives.
#[must_use]
pub fn format_exploration(payload: &Value, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return format.to_json(payload);
    }

    let target = &payload["target"];
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} for {} (TSN {}):\n",
        field(payload, "description"),
        field(target, "name"),
        field(target, "tsn"),
    );

    let relatives = &payload["relatives"];
    let total = relatives["total_found"].as_u64().unwrap_or(0);
    let records = relatives["records"].as_array().cloned().unwrap_or_default();

    if records.is_empty() {
        let _ = writeln!(out, "No relatives found ({total} total matches).");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<10} {:<40} {:<12}",
        "TSN", "Scientific name", "Kingdom"
    );
    out.push_str(&"-".repeat(64));
    out.push('\n');
    for record in &records {
        let _ = writeln!(
            out,
            "{:<10} {:<40} {:<12}",
            field(record, "tsn"),
            field(record, "name"),
            field(record, "kingdom"),
        );
    }
    let _ = writeln!(out, "\n{} of {total} relatives shown.", records.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_defaults_to_text() {
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Text);
    }

    #[test]
    fn test_format_page_text() {
        let payload = json!({
            "total_found": 2,
            "records": [
                {"tsn": "180092", "nameWInd": "Homo sapiens", "rank": "Species", "kingdom": "Animalia"},
                {"tsn": "180091", "nameWInd": "Homo", "rank": "Genus", "kingdom": "Animalia"},
            ],
        });
        let out = format_page(&payload, OutputFormat::Text);
        assert!(out.contains("Found 2 records"));
        assert!(out.contains("Homo sapiens"));
    }

    #[test]
    fn test_format_page_empty() {
        let payload = json!({"total_found": 0, "records": []});
        let out = format_page(&payload, OutputFormat::Text);
        assert!(out.contains("No records found"));
    }

    #[test]
    fn test_format_hierarchy_uses_lineage() {
        let payload = json!({
            "tsn": "180092",
            "name": "Homo sapiens",
            "rank": "Species",
            "hierarchy": {"kingdom": "Animalia"},
            "lineage": [
                {"rank": "Kingdom", "taxon": "Animalia"},
                {"rank": "Phylum", "taxon": "Chordata"},
            ],
        });
        let out = format_hierarchy(&payload, OutputFormat::Text);
        assert!(out.contains("Kingdom: Animalia"));
        assert!(out.contains("    Phylum: Chordata"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let payload = json!({"total_records": 5});
        let out = format_statistics(&payload, OutputFormat::Json);
        let parsed: Value = serde_json::from_str(&out).unwrap_or_default();
        assert_eq!(parsed, payload);
    }
}
