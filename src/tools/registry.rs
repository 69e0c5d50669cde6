//! Tool registry for managing MCP tool handlers.
//!
//! Provides a typed `ToolHandler` trait for implementing tools and a
//! `ToolRegistry` that binds each tool name to its descriptor and handler,
//! validates incoming arguments, and dispatches calls.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool as McpTool};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ToolError, ToolResult};
use crate::tools::envelope;
use crate::tools::validation::validate_arguments;

/// Boxed future returned by tool handlers.
pub type HandlerFuture<'a, T> = Pin<Box<dyn Future<Output = ToolResult<T>> + Send + 'a>>;

/// Trait for handling MCP tool invocations.
///
/// Each tool implements this trait to define its schema and execution logic.
/// Arguments arrive already validated against `input_schema` and decoded
/// into `Args`.
pub trait ToolHandler: Send + Sync {
    /// Typed arguments, decoded from the call's argument object.
    type Args: DeserializeOwned + Send;

    /// Result value, serialized into the success envelope.
    type Output: Serialize + Send;

    /// Returns the tool's name (e.g., "app_get_user").
    fn name(&self) -> &str;

    /// Returns the tool's human-readable title.
    fn title(&self) -> Option<&str> {
        None
    }

    /// Returns the tool's description.
    fn description(&self) -> &str;

    /// Returns the input schema for this tool.
    fn input_schema(&self) -> JsonObject;

    /// Returns the output schema for this tool (optional).
    fn output_schema(&self) -> Option<JsonObject> {
        None
    }

    /// Executes the tool with the given arguments.
    fn execute(&self, args: Self::Args) -> HandlerFuture<'_, Self::Output>;

    /// Converts this handler to an `McpTool` for use in `list_tools`.
    fn to_mcp_tool(&self) -> McpTool {
        use std::borrow::Cow;

        McpTool {
            name: Cow::Owned(self.name().to_string()),
            title: self.title().map(|s| s.to_string()),
            description: Some(Cow::Owned(self.description().to_string())),
            input_schema: Arc::new(self.input_schema()),
            output_schema: self.output_schema().map(Arc::new),
            annotations: None,
            icons: None,
            meta: None,
        }
    }
}

/// Object-safe view of a registered handler, operating on raw JSON.
trait ErasedHandler: Send + Sync {
    fn descriptor(&self) -> &McpTool;

    fn call(&self, args: JsonObject) -> HandlerFuture<'_, Value>;
}

/// A handler paired with the descriptor captured at registration time.
struct Registered<H> {
    handler: H,
    descriptor: McpTool,
}

impl<H: ToolHandler> ErasedHandler for Registered<H> {
    fn descriptor(&self) -> &McpTool {
        &self.descriptor
    }

    fn call(&self, args: JsonObject) -> HandlerFuture<'_, Value> {
        Box::pin(async move {
            validate_arguments(&self.descriptor.input_schema, &args)?;
            let typed: H::Args = serde_json::from_value(Value::Object(args))?;
            let output = self.handler.execute(typed).await?;
            serde_json::to_value(&output)
                .map_err(|e| ToolError::Internal(format!("failed to serialize result: {}", e)))
        })
    }
}

/// Registry for managing tool handlers.
///
/// Tools are listed in registration order. Names are unique: registering a
/// name twice replaces the earlier handler in place.
#[derive(Clone)]
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ErasedHandler>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool handler from a type that implements `ToolHandler`.
    pub fn register_handler<T: ToolHandler + 'static>(mut self, handler: T) -> Self {
        let descriptor = handler.to_mcp_tool();
        let name = descriptor.name.to_string();
        let entry: Arc<dyn ErasedHandler> = Arc::new(Registered {
            handler,
            descriptor,
        });

        match self.index.get(&name) {
            Some(&slot) => {
                tracing::warn!(tool = %name, "Tool registered twice; replacing earlier handler");
                self.handlers[slot] = entry;
            }
            None => {
                self.index.insert(name, self.handlers.len());
                self.handlers.push(entry);
            }
        }
        self
    }

    /// Get a tool descriptor by name.
    pub fn get(&self, name: &str) -> Option<&McpTool> {
        self.index
            .get(name)
            .map(|&slot| self.handlers[slot].descriptor())
    }

    /// List all registered tool names, in registration order.
    pub fn list_names(&self) -> Vec<String> {
        self.handlers
            .iter()
            .map(|handler| handler.descriptor().name.to_string())
            .collect()
    }

    /// Get all registered tools as `McpTool` instances for `list_tools`.
    pub fn list_tools(&self) -> Vec<McpTool> {
        self.handlers
            .iter()
            .map(|handler| handler.descriptor().clone())
            .collect()
    }

    /// Execute a tool by name, returning the handler's result as JSON.
    ///
    /// Unknown names and schema violations are reported as `ToolError`s
    /// without reaching a handler.
    pub async fn try_call_tool(&self, name: &str, args: JsonObject) -> ToolResult<Value> {
        let slot = *self
            .index
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        self.handlers[slot].call(args).await
    }

    /// Execute a tool by name and wrap the outcome in a response envelope.
    ///
    /// Never fails: every error becomes a `CallToolResult` with
    /// `is_error: Some(true)`.
    pub async fn call_tool(&self, name: &str, args: JsonObject) -> CallToolResult {
        tracing::debug!(tool = %name, "Dispatching tool call");

        match self.try_call_tool(name, args).await {
            Ok(value) => envelope::success(&value),
            Err(e) => {
                tracing::warn!(
                    tool = %name,
                    validation = e.is_validation(),
                    error = %e,
                    "Tool call failed"
                );
                envelope::failure(&e)
            }
        }
    }

    /// Check if a tool with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Return the number of registered tools.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Return `true` if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashSet;

    #[derive(Deserialize)]
    struct EchoArgs {
        message: String,
    }

    #[derive(Serialize)]
    struct EchoOutput {
        echoed: String,
        length: usize,
    }

    struct EchoHandler {
        name: &'static str,
    }

    impl ToolHandler for EchoHandler {
        type Args = EchoArgs;
        type Output = EchoOutput;

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Echo the message back"
        }

        fn input_schema(&self) -> JsonObject {
            json!({
                "type": "object",
                "properties": { "message": { "type": "string" } },
                "required": ["message"]
            })
            .as_object()
            .cloned()
            .unwrap()
        }

        fn execute(&self, args: EchoArgs) -> HandlerFuture<'_, EchoOutput> {
            Box::pin(async move {
                if args.message == "fail" {
                    return Err(ToolError::not_found("nothing to echo"));
                }
                Ok(EchoOutput {
                    length: args.message.len(),
                    echoed: args.message,
                })
            })
        }
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::new()
            .register_handler(EchoHandler { name: "echo_b" })
            .register_handler(EchoHandler { name: "echo_a" })
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn text_of(result: &CallToolResult) -> &str {
        result.content[0].raw.as_text().unwrap().text.as_str()
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let registry = registry();
        assert_eq!(registry.list_names(), vec!["echo_b", "echo_a"]);
        let names: Vec<String> = registry
            .list_tools()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(names, registry.list_names());
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        let registry = registry().register_handler(EchoHandler { name: "echo_b" });
        assert_eq!(registry.len(), 2);
        let names: HashSet<String> = registry.list_names().into_iter().collect();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_get_and_contains() {
        let registry = registry();
        assert!(registry.contains("echo_a"));
        assert!(!registry.contains("echo_c"));
        let tool = registry.get("echo_a").unwrap();
        assert_eq!(tool.description.as_deref(), Some("Echo the message back"));
        assert!(ToolRegistry::default().is_empty());
    }

    #[tokio::test]
    async fn test_call_success_round_trips() {
        let registry = registry();
        let result = registry
            .call_tool("echo_a", args(json!({ "message": "hi" })))
            .await;
        assert_eq!(result.is_error, Some(false));
        let parsed: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(parsed, json!({ "echoed": "hi", "length": 2 }));
    }

    #[tokio::test]
    async fn test_success_text_is_pretty_and_stable() {
        let registry = registry();
        let first = registry
            .call_tool("echo_a", args(json!({ "message": "hi" })))
            .await;
        let second = registry
            .call_tool("echo_a", args(json!({ "message": "hi" })))
            .await;
        assert_eq!(text_of(&first), text_of(&second));
        assert!(text_of(&first).contains("\n  \""));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = registry().call_tool("nope", JsonObject::new()).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_handler_failure() {
        let result = registry()
            .call_tool("echo_a", args(json!({ "message": "fail" })))
            .await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: nothing to echo");
    }

    #[tokio::test]
    async fn test_validation_failure_does_not_reach_handler() {
        let err = registry()
            .try_call_tool("echo_a", JsonObject::new())
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::MissingArgument("message".to_string()));
    }
}
