//! CLI command implementations.
//!
//! Contains the business logic for each CLI command. Every query command
//! funnels through the same operation handlers the MCP server uses; the
//! CLI only adds argument plumbing and output formatting.

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{Context, bail};

use crate::cli::output::{
    OutputFormat, format_exploration, format_hierarchy, format_page, format_statistics,
};
use crate::cli::parser::{Cli, Commands, McpCommands};
use crate::config::ItisConfig;
use crate::ops::{
    self, AutocompleteRequest, ExploreTaxonomyRequest, GetHierarchyRequest, GetStatisticsRequest,
    SearchByKingdomRequest, SearchByNameRequest, SearchByRankRequest, SearchByTsnRequest,
    SearchItisRequest,
};
use crate::solr::ItisClient;
use crate::taxonomy::ExplorationLevel;

/// Executes the CLI command.
///
/// # Errors
///
/// Returns an error if argument validation, the HTTP request, or the
/// server startup fails.
pub fn execute(cli: &Cli) -> anyhow::Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let config = resolve_config(cli);

    if let Commands::Mcp(sub) = &cli.command {
        return cmd_mcp(sub, config);
    }

    let client = ItisClient::new(config).context("Failed to create HTTP client")?;
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    match &cli.command {
        Commands::Search {
            query,
            start,
            rows,
            sort,
            fields,
            filters,
        } => {
            let req = SearchItisRequest {
                query: query.clone(),
                start: *start,
                rows: *rows,
                sort: sort.clone(),
                fields: parse_fields(fields.as_deref()),
                filters: parse_filters(filters)?,
            };
            let payload = rt.block_on(ops::search_itis(&client, req))?;
            Ok(format_page(&payload, format))
        }
        Commands::Name { name, start, rows } => {
            let req = SearchByNameRequest {
                name: name.clone(),
                start: *start,
                rows: *rows,
            };
            let payload = rt.block_on(ops::search_by_scientific_name(&client, req))?;
            Ok(format_page(&payload, format))
        }
        Commands::Tsn { tsn } => {
            let req = SearchByTsnRequest { tsn: tsn.clone() };
            let payload = rt.block_on(ops::search_by_tsn(&client, req))?;
            Ok(format_page(&payload, format))
        }
        Commands::Kingdom {
            kingdom,
            start,
            rows,
        } => {
            let req = SearchByKingdomRequest {
                kingdom: kingdom.clone(),
                start: *start,
                rows: *rows,
            };
            let payload = rt.block_on(ops::search_by_kingdom(&client, req))?;
            Ok(format_page(&payload, format))
        }
        Commands::Rank { rank, start, rows } => {
            let req = SearchByRankRequest {
                rank: rank.clone(),
                start: *start,
                rows: *rows,
            };
            let payload = rt.block_on(ops::search_by_rank(&client, req))?;
            Ok(format_page(&payload, format))
        }
        Commands::Hierarchy { tsn } => {
            let req = GetHierarchyRequest { tsn: tsn.clone() };
            let payload = rt.block_on(ops::get_hierarchy(&client, req))?;
            Ok(format_hierarchy(&payload, format))
        }
        Commands::Autocomplete { partial_name, rows } => {
            let req = AutocompleteRequest {
                partial_name: partial_name.clone(),
                rows: *rows,
            };
            let payload = rt.block_on(ops::autocomplete_search(&client, req))?;
            Ok(format_page(&payload, format))
        }
        Commands::Stats => {
            let payload = rt.block_on(ops::get_statistics(&client, GetStatisticsRequest {}))?;
            Ok(format_statistics(&payload, format))
        }
        Commands::Explore {
            scientific_name,
            level,
            rows,
        } => {
            let level = ExplorationLevel::from_str(level).map_err(anyhow::Error::msg)?;
            let req = ExploreTaxonomyRequest {
                scientific_name: scientific_name.clone(),
                level,
                rows: *rows,
            };
            let payload = rt.block_on(ops::explore_taxonomy(&client, req))?;
            Ok(format_exploration(&payload, format))
        }
        Commands::Mcp(_) => unreachable!("handled above"),
    }
}

/// Builds the index configuration from environment, then CLI overrides.
fn resolve_config(cli: &Cli) -> ItisConfig {
    let mut builder = ItisConfig::builder().from_env();
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(secs) = cli.timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    builder.build()
}

/// Splits a comma-separated projection list into field names.
fn parse_fields(fields: Option<&str>) -> Vec<String> {
    fields
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Parses repeated `field=value` filter arguments.
fn parse_filters(raw: &[String]) -> anyhow::Result<BTreeMap<String, String>> {
    let mut filters = BTreeMap::new();
    for entry in raw {
        let Some((field, value)) = entry.split_once('=') else {
            bail!("Invalid filter '{entry}': expected FIELD=VALUE");
        };
        if field.is_empty() {
            bail!("Invalid filter '{entry}': empty field name");
        }
        filters.insert(field.to_string(), value.to_string());
    }
    Ok(filters)
}

/// Starts the MCP server on the requested transport.
///
/// Runs until the transport closes (stdio) or the process receives
/// ctrl-c (SSE).
fn cmd_mcp(cmd: &McpCommands, config: ItisConfig) -> anyhow::Result<String> {
    use crate::mcp::{ItisMcpServer, serve_sse, serve_stdio};

    let server = ItisMcpServer::new(config).context("Failed to create MCP server")?;
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    rt.block_on(async {
        match cmd {
            McpCommands::Stdio => serve_stdio(server).await,
            McpCommands::Sse { host, port } => serve_sse(server, host, *port).await,
        }
    })
    .context("MCP server error")?;

    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters_accepts_field_value_pairs() {
        let raw = vec!["kingdom=Animalia".to_string(), "rank=Species".to_string()];
        let filters = parse_filters(&raw).unwrap_or_default();
        assert_eq!(filters.get("kingdom").map(String::as_str), Some("Animalia"));
        assert_eq!(filters.get("rank").map(String::as_str), Some("Species"));
    }

    #[test]
    fn test_parse_filters_rejects_missing_separator() {
        let raw = vec!["kingdomAnimalia".to_string()];
        assert!(parse_filters(&raw).is_err());
    }

    #[test]
    fn test_parse_filters_allows_value_with_equals() {
        let raw = vec!["query=a=b".to_string()];
        let filters = parse_filters(&raw).unwrap_or_default();
        assert_eq!(filters.get("query").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn test_parse_fields_splits_and_trims() {
        assert_eq!(
            parse_fields(Some("tsn, nameWInd ,rank")),
            vec!["tsn", "nameWInd", "rank"]
        );
        assert!(parse_fields(None).is_empty());
        assert!(parse_fields(Some("")).is_empty());
    }
}
