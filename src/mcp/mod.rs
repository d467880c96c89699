//! MCP (Model Context Protocol) server for itis-mcp.
//!
//! Exposes the taxonomic operation catalog as MCP tools and the guided
//! workflow templates as MCP prompts, so external agents can query the
//! ITIS index without speaking SOLR themselves.
//!
//! # Architecture
//!
//! ```text
//! MCP Client (agent)
//!   ↓ tool call (search_*, get_hierarchy, explore_taxonomy, ...)
//! ItisMcpServer
//!   ↓ typed request structs (ops::params)
//! Operation handlers (ops)
//!   ↓ SearchSpec → HTTP GET /solr/select
//! ITIS SOLR index
//!   ↓
//! JSON payload (or error-flagged payload) → MCP Client
//! ```

pub mod prompts;
pub mod server;
pub mod transport;

pub use server::ItisMcpServer;
pub use transport::{serve_sse, serve_stdio};
