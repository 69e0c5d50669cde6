use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use example_mcp_server::{CONFIG_ENV_VAR, create_server, load_server_config};

#[derive(Parser)]
#[command(name = "example-mcp-server")]
#[command(about = "Example MCP server exposing status, user and item tools")]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP stdio server (default)
    Stdio,
    /// Run as an MCP HTTP server
    Http {
        /// Bind address, e.g. 0.0.0.0:3942
        #[arg(long, default_value = "127.0.0.1:3942")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; diagnostics go to stderr only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("example_mcp_server=info".parse()?)
                .add_directive("rmcp=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        tracing::error!("Fatal error: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_server_config(cli.config)?;
    let server = create_server(&config);

    match cli.command.unwrap_or(Commands::Stdio) {
        Commands::Stdio => {
            info!("Example MCP server running on stdio");
            example_mcp_server::server::serve_stdio(server).await?;
        }
        Commands::Http { bind } => {
            info!("Starting MCP HTTP server on {}", bind);
            example_mcp_server::server::start_mcp_http(server, &bind).await?;
        }
    }

    Ok(())
}
