//! File-backed JSON stores for conversation state
//!
//! Three documents, each rewritten in full on every save: the ordered
//! conversation history, the free-form long-term memory (entries plus
//! contacts), and per-user data. Loads degrade to an empty document when
//! the file is missing or corrupt; a persistence failure never aborts the
//! conversation loop.
//!
//! Writes are not synchronized internally. A caller running concurrent
//! agents over the same files must serialize writes per document or risk
//! losing updates to the last writer.

pub mod history;
pub mod memory;

pub use history::HistoryStore;
pub use memory::{Contact, MemoryEntry, MemoryStore, UserDataStore};
