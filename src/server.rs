//! MCP server implementation using rmcp.
//!
//! `McpServer` is the `ServerHandler` that rmcp drives over stdio or
//! streamable HTTP. It answers `tools/list` from the registry and routes
//! `tools/call` through the registry's dispatcher, one call at a time.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use rmcp::service::ServiceExt;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
};
use tokio::sync::Mutex;

use crate::config::ServerConfig;
use crate::tools::ToolRegistry;

/// MCP server that handles protocol requests and delegates to tool handlers.
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    instructions: Arc<str>,
    /// Held for the duration of each `tools/call`; clones share it, so at
    /// most one call is in flight across every session of this server.
    call_gate: Arc<Mutex<()>>,
}

impl McpServer {
    /// Create a new MCP server with the given tool registry.
    pub fn new(tool_registry: Arc<ToolRegistry>, config: &ServerConfig) -> Self {
        Self {
            tool_registry,
            instructions: Arc::from(config.instructions.as_str()),
            call_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Get the tool registry.
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Execute a tool call, waiting for any in-flight call to finish first.
    ///
    /// Always produces exactly one `CallToolResult`; failures are reported
    /// through `is_error`.
    pub async fn dispatch(&self, name: &str, args: JsonObject) -> CallToolResult {
        let _guard = self.call_gate.lock().await;
        self.tool_registry.call_tool(name, args).await
    }
}

impl ServerHandler for McpServer {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let result = ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
            ..Default::default()
        };
        std::future::ready(Ok(result))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        let tool_name = request.name.to_string();
        let args = request.arguments.unwrap_or_default();

        async move { Ok(self.dispatch(&tool_name, args).await) }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(self.instructions.to_string()),
            ..Default::default()
        }
    }
}

/// Run the server over stdin/stdout until the client disconnects.
pub async fn serve_stdio(server: McpServer) -> Result<()> {
    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("serving error: {:?}", e))?;

    // Block until the MCP session ends.
    let reason = service.waiting().await?;
    tracing::info!(?reason, "MCP stdio session ended");
    Ok(())
}

/// Start the server as an MCP Streamable HTTP server.
///
/// This exposes the MCP endpoint at `/mcp` on the given bind address,
/// e.g. `127.0.0.1:3942`. Every session shares the same registry and
/// call gate.
pub async fn start_mcp_http(server: McpServer, bind: &str) -> Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = Router::new().nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind(bind).await?;

    tracing::info!("MCP HTTP server listening on http://{}/mcp", bind);

    axum::serve(listener, router).await?;

    Ok(())
}
