//! Tool handler registry for managing MCP tool implementations.
//!
//! This module provides a simple way to register and invoke tool handlers,
//! making it easy to add new tools without modifying the core `ServerHandler`
//! implementation.

mod envelope;
mod registry;
mod validation;

pub use registry::{HandlerFuture, ToolHandler, ToolRegistry};
pub use validation::validate_arguments;

// Tool handler implementations
mod create_item;
mod get_status;
mod get_user;

pub use create_item::{CreateItemArgs, CreateItemHandler, CreateItemOutcome, Item};
pub use get_status::{GetStatusArgs, GetStatusHandler, StatusReport};
pub use get_user::{GetUserArgs, GetUserHandler, User};

use crate::config::ServerConfig;

/// Build the registry of bundled tools, skipping any the config disables.
pub fn default_registry(config: &ServerConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    if config.is_tool_enabled("app_get_status") {
        registry = registry.register_handler(GetStatusHandler::new());
    }
    if config.is_tool_enabled("app_get_user") {
        registry = registry.register_handler(GetUserHandler::new());
    }
    if config.is_tool_enabled("app_create_item") {
        registry = registry.register_handler(CreateItemHandler::new());
    }

    for name in &config.disabled_tools {
        tracing::info!(tool = %name, "Tool disabled by configuration");
    }

    registry
}
