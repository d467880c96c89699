//! MCP server implementation for itis-mcp.
//!
//! Exposes the operation catalog as MCP tools and the workflow templates as
//! MCP prompts. Every tool routes through the same typed handlers the CLI
//! uses; handler failures come back as error-flagged tool results rather
//! than protocol errors, so a bad lookup never tears down the session.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, GetPromptRequestParams, GetPromptResult, Implementation,
    ListPromptsResult, PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, tool, tool_handler, tool_router};

use crate::config::ItisConfig;
use crate::error::Result as ItisResult;
use crate::ops::{
    self, AutocompleteRequest, ExploreTaxonomyRequest, GetHierarchyRequest, GetStatisticsRequest,
    SearchByKingdomRequest, SearchByNameRequest, SearchByRankRequest, SearchByTsnRequest,
    SearchItisRequest,
};
use crate::solr::ItisClient;

use super::prompts;

/// Shapes a handler outcome as a tool result.
///
/// Success payloads are pretty-printed JSON text; failures become
/// error-flagged results carrying the same payload shape the dispatcher
/// produces, with `is_error` set so callers can branch without parsing.
fn render(outcome: ItisResult<serde_json::Value>) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(payload) => {
            let text = serde_json::to_string_pretty(&payload)
                .map_err(|e| McpError::internal_error(format!("Serialization error: {e}"), None))?;
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(err) => {
            let text = serde_json::to_string_pretty(&err.to_payload())
                .map_err(|e| McpError::internal_error(format!("Serialization error: {e}"), None))?;
            Ok(CallToolResult::error(vec![Content::text(text)]))
        }
    }
}

/// ITIS MCP server.
///
/// Holds one shared HTTP client; tool calls borrow it concurrently.
#[derive(Clone)]
pub struct ItisMcpServer {
    tool_router: ToolRouter<Self>,
    client: Arc<ItisClient>,
    config: ItisConfig,
}

#[tool_router]
impl ItisMcpServer {
    /// Raw SOLR search with full control over query, filters, paging,
    /// sorting, and field projection.
    #[tool(
        name = "search_itis",
        description = "Search the ITIS taxonomic database with a raw SOLR query. Supports pagination (start/rows), sorting, field projection, and exact-match filters. Returns JSON with the total hit count and matching records."
    )]
    async fn search_itis(
        &self,
        Parameters(params): Parameters<SearchItisRequest>,
    ) -> Result<CallToolResult, McpError> {
        render(ops::search_itis(&self.client, params).await)
    }

    /// Exact scientific-name lookup.
    #[tool(
        name = "search_by_scientific_name",
        description = "Find taxonomic records matching an exact scientific name, e.g. 'Homo sapiens'. Returns TSN, rank, kingdom, and full classification fields for each match."
    )]
    async fn search_by_scientific_name(
        &self,
        Parameters(params): Parameters<SearchByNameRequest>,
    ) -> Result<CallToolResult, McpError> {
        render(ops::search_by_scientific_name(&self.client, params).await)
    }

    /// TSN lookup.
    #[tool(
        name = "search_by_tsn",
        description = "Look up a single taxonomic record by its Taxonomic Serial Number (TSN), the stable ITIS identifier."
    )]
    async fn search_by_tsn(
        &self,
        Parameters(params): Parameters<SearchByTsnRequest>,
    ) -> Result<CallToolResult, McpError> {
        render(ops::search_by_tsn(&self.client, params).await)
    }

    /// Kingdom-scoped search.
    #[tool(
        name = "search_by_kingdom",
        description = "List taxonomic records within a kingdom (Animalia, Plantae, Fungi, Bacteria, Archaea, Protozoa, Chromista). Supports pagination."
    )]
    async fn search_by_kingdom(
        &self,
        Parameters(params): Parameters<SearchByKingdomRequest>,
    ) -> Result<CallToolResult, McpError> {
        render(ops::search_by_kingdom(&self.client, params).await)
    }

    /// Rank-scoped search.
    #[tool(
        name = "search_by_rank",
        description = "List taxonomic records at a given rank (Kingdom, Phylum, Class, Order, Family, Genus, Species). Supports pagination."
    )]
    async fn search_by_rank(
        &self,
        Parameters(params): Parameters<SearchByRankRequest>,
    ) -> Result<CallToolResult, McpError> {
        render(ops::search_by_rank(&self.client, params).await)
    }

    /// Complete ancestry for one record.
    #[tool(
        name = "get_hierarchy",
        description = "Retrieve the complete taxonomic hierarchy for a record by TSN, from Kingdom down to Species, including the parsed lineage entries."
    )]
    async fn get_hierarchy(
        &self,
        Parameters(params): Parameters<GetHierarchyRequest>,
    ) -> Result<CallToolResult, McpError> {
        render(ops::get_hierarchy(&self.client, params).await)
    }

    /// Name-prefix completion.
    #[tool(
        name = "autocomplete_search",
        description = "Suggest scientific names starting with a partial name, sorted alphabetically. Useful for resolving misspelled or incomplete names."
    )]
    async fn autocomplete_search(
        &self,
        Parameters(params): Parameters<AutocompleteRequest>,
    ) -> Result<CallToolResult, McpError> {
        render(ops::autocomplete_search(&self.client, params).await)
    }

    /// Index-wide record count.
    #[tool(
        name = "get_statistics",
        description = "Return the total number of taxonomic records in the ITIS index."
    )]
    async fn get_statistics(
        &self,
        Parameters(params): Parameters<GetStatisticsRequest>,
    ) -> Result<CallToolResult, McpError> {
        render(ops::get_statistics(&self.client, params).await)
    }

    /// Relative exploration from a resolved name.
    #[tool(
        name = "explore_taxonomy",
        description = "Explore taxonomic relatives of an organism: sibling species in the same genus, or species sharing its family, order, or class. Resolves the scientific name first, then searches for relatives."
    )]
    async fn explore_taxonomy(
        &self,
        Parameters(params): Parameters<ExploreTaxonomyRequest>,
    ) -> Result<CallToolResult, McpError> {
        render(ops::explore_taxonomy(&self.client, params).await)
    }
}

#[tool_handler]
impl ServerHandler for ItisMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "itis-mcp".to_string(),
                title: Some("ITIS Taxonomy MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: Some("https://www.itis.gov/".to_string()),
            },
            instructions: Some(
                "ITIS taxonomy server backed by the Integrated Taxonomic Information System \
                 SOLR index. Use search_by_scientific_name to resolve organisms, get_hierarchy \
                 for full classifications, and explore_taxonomy to find related species. \
                 search_itis accepts raw SOLR queries for advanced use."
                    .to_string(),
            ),
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: prompts::catalog(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn get_prompt(
        &self,
        GetPromptRequestParams { name, arguments, .. }: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        prompts::render(&name, arguments.as_ref())
    }
}

impl ItisMcpServer {
    /// Creates a new MCP server over the given index configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ItisConfig) -> crate::error::Result<Self> {
        let client = Arc::new(ItisClient::new(config.clone())?);
        Ok(Self {
            tool_router: Self::tool_router(),
            client,
            config,
        })
    }

    /// The index configuration this server was built with.
    #[must_use]
    pub fn config(&self) -> &ItisConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_advertises_tools_and_prompts() {
        let server = ItisMcpServer::new(ItisConfig::default()).unwrap_or_else(|_| unreachable!());
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert_eq!(info.server_info.name, "itis-mcp");
    }

    #[test]
    fn test_tool_router_covers_the_catalog() {
        let router = ItisMcpServer::tool_router();
        let tools = router.list_all();
        assert_eq!(tools.len(), crate::ops::Operation::NAMES.len());
        for name in crate::ops::Operation::NAMES {
            assert!(tools.iter().any(|t| t.name == name), "missing tool {name}");
        }
    }
}
