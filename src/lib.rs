// Core modules
mod config;
mod error;
mod types;

pub mod server;
pub mod tools;

// Re-export key types and functions
pub use config::{CONFIG_ENV_VAR, ServerConfig, load_server_config, resolve_config_path};
pub use error::{ToolError, ToolResult};
pub use types::{ItemId, Priority, UserId};

pub use server::McpServer;
pub use tools::{ToolHandler, ToolRegistry, default_registry};

use std::sync::Arc;

/// Convenience function to create a fully configured MCP server.
///
/// This registers the bundled tools (minus any the config disables) and
/// returns a McpServer that implements rmcp's ServerHandler.
pub fn create_server(config: &ServerConfig) -> McpServer {
    let tool_registry = Arc::new(default_registry(config));

    tracing::info!(
        tools = ?tool_registry.list_names(),
        "Tool registry ready"
    );

    McpServer::new(tool_registry, config)
}
