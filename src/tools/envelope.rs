//! Response envelopes for `tools/call`.
//!
//! Every call attempt ends in exactly one `CallToolResult` carrying a single
//! text block; `is_error` distinguishes success from failure.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use crate::error::ToolError;

/// Wrap a handler result as pretty-printed JSON text.
pub fn success(value: &Value) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult {
            content: vec![Content::text(text)],
            structured_content: None,
            is_error: Some(false),
            meta: None,
        },
        Err(e) => failure(&ToolError::Internal(format!(
            "failed to serialize result: {}",
            e
        ))),
    }
}

/// Wrap an error as `Error: <message>`.
pub fn failure(err: &ToolError) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(format!("Error: {}", err))],
        structured_content: None,
        is_error: Some(true),
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_of(result: &CallToolResult) -> &str {
        result.content[0].raw.as_text().unwrap().text.as_str()
    }

    #[test]
    fn test_success_envelope() {
        let value = json!({ "status": "online" });
        let result = success(&value);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);
        assert_eq!(text_of(&result), "{\n  \"status\": \"online\"\n}");
        assert!(result.structured_content.is_none());
    }

    #[test]
    fn test_success_round_trip() {
        let value = json!({ "a": [1, 2, { "b": null }], "c": "d" });
        let result = success(&value);
        let parsed: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_failure_envelope() {
        let result = failure(&ToolError::UnknownTool("no_such_tool".to_string()));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
        assert_eq!(text_of(&result), "Error: Unknown tool: no_such_tool");
    }
}
