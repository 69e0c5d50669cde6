//! Handler for the `app_get_user` tool.
//!
//! Looks up a user by id in a fixed in-memory directory.

use std::collections::HashMap;

use rmcp::model::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ToolError;
use crate::tools::{HandlerFuture, ToolHandler};
use crate::types::UserId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserArgs {
    pub user_id: UserId,
}

/// A directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    fn new(id: &str, name: &str, email: &str, role: &str) -> Self {
        Self {
            id: UserId::new(id),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }
}

/// Handler for the `app_get_user` tool.
pub struct GetUserHandler {
    users: HashMap<UserId, User>,
}

impl GetUserHandler {
    /// Create a handler backed by the bundled demo directory.
    pub fn new() -> Self {
        Self::with_users(vec![
            User::new("1", "Alice Johnson", "alice@example.com", "admin"),
            User::new("2", "Bob Smith", "bob@example.com", "user"),
            User::new("3", "Carol White", "carol@example.com", "user"),
        ])
    }

    /// Create a handler backed by the given users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }

    /// Build the input schema for this tool.
    fn input_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));

        let mut properties = serde_json::Map::new();
        properties.insert(
            "userId".to_string(),
            json!({
                "type": "string",
                "description": "User ID to retrieve",
            }),
        );

        schema.insert("properties".to_string(), json!(properties));
        schema.insert("required".to_string(), json!(["userId"]));
        schema
    }
}

impl Default for GetUserHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for GetUserHandler {
    type Args = GetUserArgs;
    type Output = User;

    fn name(&self) -> &str {
        "app_get_user"
    }

    fn description(&self) -> &str {
        "Get user details by ID"
    }

    fn input_schema(&self) -> JsonObject {
        self.input_schema()
    }

    fn execute(&self, args: GetUserArgs) -> HandlerFuture<'_, User> {
        Box::pin(async move {
            self.users.get(&args.user_id).cloned().ok_or_else(|| {
                ToolError::not_found(format!("User with ID {} not found", args.user_id))
            })
        })
    }
}
