//! Memory and contact tools
//!
//! store_memory persists a long-term fact for the active user;
//! store_user_information writes to the shared knowledge base; the contact
//! tools manage named records in the shared memory document.

use crate::errors::Result;
use crate::store::Contact;
use crate::tools::types::{Tool, ToolArgs, ToolContext, ToolSchema};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;

pub struct StoreMemoryTool;

#[async_trait]
impl Tool for StoreMemoryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "store_memory",
            "Stores a memory about the user for later conversations. Use when \
             the user shares a lasting fact about themselves or their life.",
            json!({
                "type": "object",
                "properties": {
                    "memory_content": {
                        "type": "string",
                        "description": "The memory content to store."
                    }
                },
                "required": ["memory_content"]
            }),
        )
    }

    async fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<String> {
        let content = args.required_str("memory_content")?;
        let mut user_data = ctx.user_data.lock().await;
        user_data.store_memory(&ctx.user_id, content)?;
        Ok("Memory stored.".to_string())
    }
}

pub struct StoreUserInfoTool;

#[async_trait]
impl Tool for StoreUserInfoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "store_user_information",
            "Stores general user information in the shared knowledge base, \
             not tied to any single user. Use for facts worth keeping that \
             are not about the active user themselves.",
            json!({
                "type": "object",
                "properties": {
                    "data": {
                        "type": "string",
                        "description": "The information to store."
                    }
                },
                "required": ["data"]
            }),
        )
    }

    async fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<String> {
        let data = args.required_str("data")?;
        let mut memory = ctx.memory.lock().await;
        memory.store_entry(data)?;
        Ok("User information stored successfully.".to_string())
    }
}

pub struct StoreContactTool;

#[async_trait]
impl Tool for StoreContactTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "store_contact",
            "Stores a contact: a person the user knows, with their relation \
             to the user and general information.",
            json!({
                "type": "object",
                "properties": {
                    "contact_name": {
                        "type": "string",
                        "description": "The name of the contact."
                    },
                    "information": {
                        "type": "string",
                        "description": "General information about the contact."
                    },
                    "relation": {
                        "type": "string",
                        "description": "The user's relationship with the contact."
                    },
                    "other_data": {
                        "type": "object",
                        "description": "Additional data about the contact."
                    }
                },
                "required": ["contact_name", "information", "relation"]
            }),
        )
    }

    async fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<String> {
        let name = args.required_str("contact_name")?;
        let contact = Contact {
            information: args.required_str("information")?.to_string(),
            relation: args.required_str("relation")?.to_string(),
            other_data: args.optional_object("other_data").unwrap_or_default(),
        };
        let mut memory = ctx.memory.lock().await;
        memory.store_contact(name, contact)?;
        Ok(format!("Contact '{}' stored successfully.", name))
    }
}

pub struct UpdateContactTool;

#[async_trait]
impl Tool for UpdateContactTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "update_contact",
            "Updates an existing contact. Only the provided fields change; \
             additional data merges with what is already stored.",
            json!({
                "type": "object",
                "properties": {
                    "contact_name": {
                        "type": "string",
                        "description": "The name of the contact to update."
                    },
                    "information": {
                        "type": "string",
                        "description": "Updated general information."
                    },
                    "relation": {
                        "type": "string",
                        "description": "Updated relationship."
                    },
                    "other_data": {
                        "type": "object",
                        "description": "Additional data to merge into the contact."
                    }
                },
                "required": ["contact_name"]
            }),
        )
    }

    async fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<String> {
        let name = args.required_str("contact_name")?;
        let information = args.optional_str("information").map(str::to_string);
        let relation = args.optional_str("relation").map(str::to_string);
        let other_data: Option<HashMap<String, serde_json::Value>> =
            args.optional_object("other_data");

        let mut memory = ctx.memory.lock().await;
        if memory.update_contact(name, information, relation, other_data)? {
            Ok(format!("Contact '{}' updated successfully.", name))
        } else {
            Ok(format!("Contact '{}' not found.", name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, UserDataStore};
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    fn ctx(dir: &TempDir) -> ToolContext {
        ToolContext::new(
            "user1",
            Arc::new(Mutex::new(MemoryStore::open(dir.path().join("memory.json")))),
            Arc::new(Mutex::new(UserDataStore::open(
                dir.path().join("user_data.json"),
            ))),
        )
    }

    fn args(value: serde_json::Value) -> ToolArgs {
        ToolArgs::new(
            value
                .as_object()
                .unwrap()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_store_memory_for_active_user() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx(&dir);

        let out = StoreMemoryTool
            .execute(&args(json!({"memory_content": "likes blue cars"})), &ctx)
            .await
            .unwrap();
        assert_eq!(out, "Memory stored.");
        assert_eq!(ctx.user_data.lock().await.memories("user1").len(), 1);
    }

    #[tokio::test]
    async fn test_store_user_information_goes_to_shared_memory() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx(&dir);

        let out = StoreUserInfoTool
            .execute(&args(json!({"data": "the wifi password is hunter2"})), &ctx)
            .await
            .unwrap();
        assert_eq!(out, "User information stored successfully.");

        let memory = ctx.memory.lock().await;
        let entries = memory.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries
            .values()
            .any(|e| e.memory == "the wifi password is hunter2"));
        // shared knowledge base, not the per-user store
        assert!(ctx.user_data.lock().await.memories("user1").is_empty());
    }

    #[tokio::test]
    async fn test_store_then_update_contact() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx(&dir);

        StoreContactTool
            .execute(
                &args(json!({
                    "contact_name": "Ravi",
                    "information": "works at the bakery",
                    "relation": "neighbour"
                })),
                &ctx,
            )
            .await
            .unwrap();

        let out = UpdateContactTool
            .execute(
                &args(json!({
                    "contact_name": "Ravi",
                    "other_data": {"status": "on holiday"}
                })),
                &ctx,
            )
            .await
            .unwrap();
        assert!(out.contains("updated"));

        let memory = ctx.memory.lock().await;
        let contact = memory.contact("Ravi").unwrap();
        assert_eq!(contact.relation, "neighbour");
        assert_eq!(contact.other_data["status"], json!("on holiday"));
    }

    #[tokio::test]
    async fn test_update_missing_contact_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let ctx = ctx(&dir);

        let out = UpdateContactTool
            .execute(&args(json!({"contact_name": "Ghost"})), &ctx)
            .await
            .unwrap();
        assert!(out.contains("not found"));
    }
}
