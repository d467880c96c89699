//! Binary entry point for itis-mcp.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use itis_mcp::cli::{Cli, commands};

fn main() {
    // Logs go to stderr; stdout is reserved for command output and, in MCP
    // stdio mode, protocol messages.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match commands::execute(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                #[allow(clippy::print_stdout)]
                {
                    print!("{output}");
                }
            }
        }
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {err:#}");
            }
            std::process::exit(1);
        }
    }
}
