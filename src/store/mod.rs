//! The shared document store the game synchronizes through.
//!
//! The store holds lobby documents addressed by slash-separated paths and
//! pushes change notifications to subscribers. It offers no transactions;
//! the only atomicity is a multi-path write applied as one unit, plus an
//! optional compare-and-swap on a per-document version counter that turns
//! silent lost updates into explicit conflicts.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::broadcast;

pub use memory::InMemoryDocumentStore;

mod memory;

/// Collaborator-layer failures, passed through to callers unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("write conflict on {path}: expected version {expected}, found {actual}")]
    VersionConflict {
        path: String,
        expected: u64,
        actual: u64,
    },

    #[error("store failure: {0}")]
    Backend(String),
}

/// One observed mutation, delivered to subscribers of any overlapping path.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChange {
    pub path: String,
    /// The new value at `path`; `None` when the path was deleted.
    pub value: Option<Value>,
}

/// Returns the document key a path belongs to: the first two segments
/// (collection and document id), e.g. `lobbies/BQXKZ7` for
/// `lobbies/BQXKZ7/game/phase`. Versions are tracked per document key.
pub fn document_key(path: &str) -> String {
    path.split('/').take(2).collect::<Vec<_>>().join("/")
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Reads a path together with the current version of its enclosing
    /// document (0 for a document that has never been written).
    async fn read_with_version(&self, path: &str) -> Result<(Option<Value>, u64), StoreError>;

    /// Applies every `(path, value)` pair as one atomic unit. An explicit
    /// `Value::Null` sets the field to null; omitting a path always means
    /// "leave unchanged", never "delete".
    async fn write(&self, updates: Vec<(String, Value)>) -> Result<(), StoreError>;

    /// Like [`write`](DocumentStore::write), but only if the version of the
    /// document at `key` still equals `expected`; otherwise fails with
    /// [`StoreError::VersionConflict`] and writes nothing.
    async fn write_if_version(
        &self,
        key: &str,
        expected: u64,
        updates: Vec<(String, Value)>,
    ) -> Result<(), StoreError>;

    async fn delete(&self, path: &str) -> Result<(), StoreError>;

    /// Change feed for a path and everything beneath it.
    async fn subscribe(&self, path: &str) -> broadcast::Receiver<DocumentChange>;

    /// Registers a server-side fallback write applied if this client
    /// disconnects uncleanly. Used for presence, not game-state integrity.
    async fn on_disconnect_cleanup(&self, path: &str, fallback: Value) -> Result<(), StoreError>;
}
