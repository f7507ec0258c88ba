//! Long-term memory and per-user data persistence
//!
//! `memory.json` holds free-form memory entries keyed by generated id plus
//! a contacts map; `user_data.json` maps user ids to their own memory
//! records. Entry ids are UUIDv4 with an RFC3339 timestamp on the entry
//! itself.

use crate::errors::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// One long-term memory entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub memory: String,
    pub timestamp: String,
}

impl MemoryEntry {
    fn now(memory: impl Into<String>) -> Self {
        Self {
            memory: memory.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// A stored contact record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub information: String,
    pub relation: String,
    #[serde(default)]
    pub other_data: HashMap<String, serde_json::Value>,
}

/// Shape of the memory.json document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MemoryDocument {
    #[serde(default)]
    entries: HashMap<String, MemoryEntry>,
    #[serde(default)]
    contacts: HashMap<String, Contact>,
}

/// Per-user record inside user_data.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserRecord {
    #[serde(default)]
    memories: HashMap<String, MemoryEntry>,
}

fn load_document<T: Default + serde::de::DeserializeOwned>(path: &Path, what: &str) -> T {
    if !path.exists() {
        debug!(path = %path.display(), "{} file not found, starting empty", what);
        return T::default();
    }
    match fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "{} file corrupt, starting empty", what);
                T::default()
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "{} file unreadable, starting empty", what);
            T::default()
        }
    }
}

fn save_document<T: Serialize>(path: &Path, doc: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json)?;
    Ok(())
}

/// File-backed long-term memory: entries plus contacts
#[derive(Debug)]
pub struct MemoryStore {
    path: PathBuf,
    document: MemoryDocument,
}

impl MemoryStore {
    /// Open the memory store, degrading to empty on a missing or corrupt
    /// file
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = load_document(&path, "memory");
        Self { path, document }
    }

    /// Store a memory entry under a fresh id; returns the id
    pub fn store_entry(&mut self, memory: impl Into<String>) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.document.entries.insert(id.clone(), MemoryEntry::now(memory));
        self.save()?;
        Ok(id)
    }

    pub fn entries(&self) -> &HashMap<String, MemoryEntry> {
        &self.document.entries
    }

    /// Store a contact record, replacing any existing one of the same name
    pub fn store_contact(
        &mut self,
        name: impl Into<String>,
        contact: Contact,
    ) -> Result<()> {
        self.document.contacts.insert(name.into(), contact);
        self.save()
    }

    /// Update an existing contact. `information` and `relation` replace
    /// when given; `other_data` merges key by key rather than overwriting
    /// the whole map. Returns false when the contact does not exist.
    pub fn update_contact(
        &mut self,
        name: &str,
        information: Option<String>,
        relation: Option<String>,
        other_data: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<bool> {
        let Some(contact) = self.document.contacts.get_mut(name) else {
            return Ok(false);
        };
        if let Some(information) = information {
            contact.information = information;
        }
        if let Some(relation) = relation {
            contact.relation = relation;
        }
        if let Some(extra) = other_data {
            contact.other_data.extend(extra);
        }
        self.save()?;
        Ok(true)
    }

    pub fn contact(&self, name: &str) -> Option<&Contact> {
        self.document.contacts.get(name)
    }

    fn save(&self) -> Result<()> {
        save_document(&self.path, &self.document)
    }
}

/// File-backed per-user data: each user id owns a map of memory entries
#[derive(Debug)]
pub struct UserDataStore {
    path: PathBuf,
    users: HashMap<String, UserRecord>,
}

impl UserDataStore {
    /// Open the user-data store, degrading to empty on a missing or
    /// corrupt file
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let users = load_document(&path, "user data");
        Self { path, users }
    }

    /// Store a memory entry for a user, creating their record on first
    /// use; returns the entry id
    pub fn store_memory(
        &mut self,
        user_id: &str,
        memory: impl Into<String>,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.users
            .entry(user_id.to_string())
            .or_default()
            .memories
            .insert(id.clone(), MemoryEntry::now(memory));
        self.save()?;
        Ok(id)
    }

    /// All memory entries for a user, empty when unknown
    pub fn memories(&self, user_id: &str) -> Vec<&MemoryEntry> {
        self.users
            .get(user_id)
            .map(|record| record.memories.values().collect())
            .unwrap_or_default()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    fn save(&self) -> Result<()> {
        save_document(&self.path, &self.users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_entry_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("memory.json");

        let mut store = MemoryStore::open(&path);
        let id = store.store_entry("user bought milk and eggs").unwrap();

        let reloaded = MemoryStore::open(&path);
        assert_eq!(reloaded.entries()[&id].memory, "user bought milk and eggs");
        assert!(!reloaded.entries()[&id].timestamp.is_empty());
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let dir = tempdir().unwrap();
        let mut store = MemoryStore::open(dir.path().join("memory.json"));
        let a = store.store_entry("same text").unwrap();
        let b = store.store_entry("same text").unwrap();
        assert_ne!(a, b);
        assert_eq!(store.entries().len(), 2);
    }

    #[test]
    fn test_contact_store_and_update_merges_other_data() {
        let dir = tempdir().unwrap();
        let mut store = MemoryStore::open(dir.path().join("memory.json"));

        let mut other = HashMap::new();
        other.insert("steps".to_string(), serde_json::json!(4000));
        store
            .store_contact(
                "Asha",
                Contact {
                    information: "college friend".to_string(),
                    relation: "friend".to_string(),
                    other_data: other,
                },
            )
            .unwrap();

        let mut update = HashMap::new();
        update.insert("status".to_string(), serde_json::json!("travelling"));
        let found = store
            .update_contact("Asha", None, Some("close friend".to_string()), Some(update))
            .unwrap();
        assert!(found);

        let contact = store.contact("Asha").unwrap();
        assert_eq!(contact.relation, "close friend");
        assert_eq!(contact.information, "college friend");
        // merged, not overwritten
        assert_eq!(contact.other_data["steps"], serde_json::json!(4000));
        assert_eq!(contact.other_data["status"], serde_json::json!("travelling"));
    }

    #[test]
    fn test_update_unknown_contact_reports_missing() {
        let dir = tempdir().unwrap();
        let mut store = MemoryStore::open(dir.path().join("memory.json"));
        let found = store.update_contact("Nobody", None, None, None).unwrap();
        assert!(!found);
    }

    #[test]
    fn test_user_data_isolated_per_user() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("user_data.json");

        let mut store = UserDataStore::open(&path);
        store.store_memory("user1", "name is John").unwrap();
        store.store_memory("user2", "saw a dinosaur").unwrap();

        let reloaded = UserDataStore::open(&path);
        assert_eq!(reloaded.user_count(), 2);
        assert_eq!(reloaded.memories("user1").len(), 1);
        assert_eq!(reloaded.memories("user1")[0].memory, "name is John");
        assert_eq!(reloaded.memories("user2")[0].memory, "saw a dinosaur");
        assert!(reloaded.memories("user3").is_empty());
    }

    #[test]
    fn test_corrupt_memory_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("memory.json");
        std::fs::write(&path, "[1,2,3").unwrap();

        let store = MemoryStore::open(&path);
        assert!(store.entries().is_empty());
    }
}
