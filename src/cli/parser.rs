//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};

/// itis-mcp: search and explore the ITIS taxonomic database.
///
/// Queries the Integrated Taxonomic Information System SOLR index,
/// and can serve the same operations over the Model Context Protocol.
#[derive(Parser, Debug)]
#[command(name = "itis-mcp")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the ITIS SOLR service.
    #[arg(long, env = "ITIS_BASE_URL")]
    pub base_url: Option<String>,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "ITIS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the index with a raw SOLR query.
    #[command(after_help = r#"Examples:
  itis-mcp search                                    # First 10 records
  itis-mcp search -q "nameWInd:*tiger*" --rows 25    # Wildcard query
  itis-mcp search --filter kingdom=Plantae           # Exact-match filter
  itis-mcp search --sort "nameWInd asc" --fields tsn,nameWInd
  itis-mcp --format json search -q "rank:Genus" | jq '.records[].tsn'
"#)]
    Search {
        /// SOLR query clause. Defaults to matching all records.
        #[arg(short, long)]
        query: Option<String>,

        /// Result offset for pagination.
        #[arg(long)]
        start: Option<u32>,

        /// Maximum rows to return.
        #[arg(long)]
        rows: Option<u32>,

        /// Sort clause, e.g. "nameWInd asc".
        #[arg(long)]
        sort: Option<String>,

        /// Comma-separated field names to project.
        #[arg(long)]
        fields: Option<String>,

        /// Exact-match filter as field=value (repeatable).
        #[arg(long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,
    },

    /// Find records by exact scientific name.
    #[command(after_help = r#"Examples:
  itis-mcp name "Homo sapiens"
  itis-mcp name "Quercus alba" --rows 5
  itis-mcp --format json name "Ursus arctos" | jq '.records[0].tsn'
"#)]
    Name {
        /// Scientific name, e.g. "Homo sapiens".
        name: String,

        /// Result offset for pagination.
        #[arg(long)]
        start: Option<u32>,

        /// Maximum rows to return.
        #[arg(long)]
        rows: Option<u32>,
    },

    /// Look up a record by Taxonomic Serial Number.
    Tsn {
        /// TSN to look up, e.g. 180092.
        tsn: String,
    },

    /// List records within a kingdom.
    #[command(after_help = r#"Examples:
  itis-mcp kingdom Animalia
  itis-mcp kingdom Plantae --rows 50 --start 100
"#)]
    Kingdom {
        /// Kingdom name, e.g. Animalia or Plantae.
        kingdom: String,

        /// Result offset for pagination.
        #[arg(long)]
        start: Option<u32>,

        /// Maximum rows to return.
        #[arg(long)]
        rows: Option<u32>,
    },

    /// List records at a taxonomic rank.
    Rank {
        /// Rank name, e.g. Species, Genus, Family.
        rank: String,

        /// Result offset for pagination.
        #[arg(long)]
        start: Option<u32>,

        /// Maximum rows to return.
        #[arg(long)]
        rows: Option<u32>,
    },

    /// Show the complete taxonomic hierarchy for a TSN.
    #[command(after_help = r#"Examples:
  itis-mcp hierarchy 180092                # Homo sapiens, Kingdom -> Species
  itis-mcp --format json hierarchy 180092 | jq '.lineage'
"#)]
    Hierarchy {
        /// TSN of the record whose ancestry to retrieve.
        tsn: String,
    },

    /// Suggest scientific names from a prefix.
    Autocomplete {
        /// Name prefix, e.g. "Quer" for oaks.
        partial_name: String,

        /// Maximum suggestions to return.
        #[arg(long)]
        rows: Option<u32>,
    },

    /// Show the total number of records in the index.
    Stats,

    /// Explore taxonomic relatives of an organism.
    #[command(after_help = r#"Examples:
  itis-mcp explore "Homo sapiens" siblings     # Other species in the genus
  itis-mcp explore "Panthera leo" family       # Species sharing the family
  itis-mcp explore "Ursus arctos" order --rows 25
"#)]
    Explore {
        /// Scientific name to explore from.
        scientific_name: String,

        /// Comparison scope: siblings, family, order, class.
        #[arg(default_value = "siblings")]
        level: String,

        /// Maximum relatives to return.
        #[arg(long)]
        rows: Option<u32>,
    },

    /// Start MCP (Model Context Protocol) server.
    #[command(subcommand)]
    Mcp(McpCommands),
}

/// MCP server subcommands.
#[derive(Subcommand, Debug)]
pub enum McpCommands {
    /// Start MCP server with stdio transport.
    ///
    /// Reads JSON-RPC messages from stdin, writes responses to stdout.
    /// This is the standard transport for agent integration.
    #[command(after_help = r#"Examples:
  itis-mcp mcp stdio                                 # Start stdio MCP server
  ITIS_BASE_URL=http://localhost:8983/ itis-mcp mcp stdio
"#)]
    Stdio,

    /// Start MCP server with SSE/HTTP transport.
    ///
    /// Listens for incoming HTTP connections using streamable HTTP transport.
    #[command(after_help = r#"Examples:
  itis-mcp mcp sse                            # Listen on 127.0.0.1:3000
  itis-mcp mcp sse --host 0.0.0.0 --port 8080
"#)]
    Sse {
        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to.
        #[arg(long, default_value = "3000")]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_explore_level_defaults_to_siblings() {
        let cli = Cli::parse_from(["itis-mcp", "explore", "Homo sapiens"]);
        match cli.command {
            Commands::Explore { level, .. } => assert_eq!(level, "siblings"),
            other => unreachable!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_search_collects_repeated_filters() {
        let cli = Cli::parse_from([
            "itis-mcp",
            "search",
            "--filter",
            "kingdom=Animalia",
            "--filter",
            "rank=Species",
        ]);
        match cli.command {
            Commands::Search { filters, .. } => {
                assert_eq!(filters, vec!["kingdom=Animalia", "rank=Species"]);
            }
            other => unreachable!("unexpected command: {other:?}"),
        }
    }
}
