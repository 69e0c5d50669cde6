//! Handler for the `app_create_item` tool.
//!
//! Builds a new item from the supplied title, optional description and
//! priority. Items are not persisted; the created record is returned and
//! logged.

use chrono::{DateTime, SecondsFormat, Utc};
use rmcp::model::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::tools::{HandlerFuture, ToolHandler};
use crate::types::{ItemId, Priority};

#[derive(Debug, Deserialize)]
pub struct CreateItemArgs {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
}

/// A newly created item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub created_at: String,
    pub status: String,
}

impl Item {
    /// Create an active item stamped with `now`.
    pub fn new(
        title: String,
        description: Option<String>,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ItemId::from_millis(now.timestamp_millis()),
            title,
            // an empty description is treated the same as none
            description: description.filter(|d| !d.is_empty()),
            priority,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            status: "active".to_string(),
        }
    }
}

/// Result returned by `app_create_item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemOutcome {
    pub success: bool,
    pub item: Item,
    pub message: String,
}

/// Handler for the `app_create_item` tool.
#[derive(Default)]
pub struct CreateItemHandler;

impl CreateItemHandler {
    /// Create a new item handler.
    pub fn new() -> Self {
        Self
    }

    /// Build the input schema for this tool.
    fn input_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));

        let priorities: Vec<&str> = Priority::ALL.iter().map(Priority::as_str).collect();

        let mut properties = serde_json::Map::new();
        properties.insert(
            "title".to_string(),
            json!({
                "type": "string",
                "description": "Item title",
            }),
        );
        properties.insert(
            "description".to_string(),
            json!({
                "type": "string",
                "description": "Item description (optional)",
            }),
        );
        properties.insert(
            "priority".to_string(),
            json!({
                "type": "string",
                "enum": priorities,
                "description": "Item priority level",
            }),
        );

        schema.insert("properties".to_string(), json!(properties));
        schema.insert("required".to_string(), json!(["title", "priority"]));
        schema
    }
}

impl ToolHandler for CreateItemHandler {
    type Args = CreateItemArgs;
    type Output = CreateItemOutcome;

    fn name(&self) -> &str {
        "app_create_item"
    }

    fn description(&self) -> &str {
        "Create a new item in the system"
    }

    fn input_schema(&self) -> JsonObject {
        self.input_schema()
    }

    fn execute(&self, args: CreateItemArgs) -> HandlerFuture<'_, CreateItemOutcome> {
        Box::pin(async move {
            let item = Item::new(args.title, args.description, args.priority, Utc::now());

            tracing::info!(
                item_id = %item.id,
                title = %item.title,
                priority = %item.priority,
                created_at = %item.created_at,
                "Created item"
            );

            Ok(CreateItemOutcome {
                success: true,
                message: format!("Item \"{}\" created successfully", item.title),
                item,
            })
        })
    }
}
