//! Error types for tool dispatch.
//!
//! Every variant renders as a single human-readable line; the dispatcher
//! prefixes it with `Error: ` when building an error envelope.

use std::fmt;

/// Errors that can occur while resolving, validating, or running a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// No handler is registered under the requested name.
    UnknownTool(String),

    /// A property listed in the schema's `required` array is absent or null.
    MissingArgument(String),

    /// A supplied property does not have the JSON type declared in the schema.
    InvalidArgumentType {
        field: String,
        expected: String,
    },

    /// A supplied property is outside its declared `enum` value set.
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Arguments passed schema checks but could not be decoded into the
    /// handler's argument type.
    InvalidArguments(String),

    /// The handler's lookup target does not exist.
    NotFound(String),

    /// Internal error occurred.
    Internal(String),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTool(name) => write!(f, "Unknown tool: {}", name),
            Self::MissingArgument(field) => write!(f, "Missing required argument: {}", field),
            Self::InvalidArgumentType { field, expected } => {
                write!(f, "Invalid type for argument {}: expected {}", field, expected)
            }
            Self::InvalidEnumValue {
                field,
                value,
                allowed,
            } => write!(
                f,
                "Invalid value for argument {}: \"{}\" (expected one of: {})",
                field,
                value,
                allowed.join(", ")
            ),
            Self::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            Self::NotFound(msg) => write!(f, "{}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ToolError {}

/// Result type for tool handlers.
pub type ToolResult<T> = Result<T, ToolError>;

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArguments(err.to_string())
    }
}

impl ToolError {
    /// Returns `true` for errors raised before the handler ran: unknown
    /// tool names and arguments that violate the declared schema.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownTool(_)
                | Self::MissingArgument(_)
                | Self::InvalidArgumentType { .. }
                | Self::InvalidEnumValue { .. }
                | Self::InvalidArguments(_)
        )
    }

    /// Create a not-found error with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}
