//! CLI layer for itis-mcp.
//!
//! Provides the command-line interface using clap, with commands for
//! searching the index, retrieving hierarchies, exploring relatives,
//! and starting the MCP server.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands, McpCommands};
