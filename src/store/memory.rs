use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, instrument, warn};

use super::{document_key, DocumentChange, DocumentStore, StoreError};

const CHANNEL_CAPACITY: usize = 64;

/// In-memory implementation of [`DocumentStore`] for tests and local play.
///
/// Paths descend through JSON objects by key and through arrays by index,
/// the way a replicated realtime database addresses sub-documents.
pub struct InMemoryDocumentStore {
    state: RwLock<StoreState>,
}

struct StoreState {
    root: Value,
    versions: HashMap<String, u64>,
    channels: HashMap<String, broadcast::Sender<DocumentChange>>,
    cleanups: Vec<(String, Value)>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                root: Value::Object(serde_json::Map::new()),
                versions: HashMap::new(),
                channels: HashMap::new(),
                cleanups: Vec::new(),
            }),
        }
    }

    /// Applies and clears every registered disconnect fallback, as the
    /// server side would after an unclean disconnect.
    pub async fn run_disconnect_cleanups(&self) -> Result<(), StoreError> {
        let pending = {
            let mut state = self.state.write().await;
            std::mem::take(&mut state.cleanups)
        };
        if !pending.is_empty() {
            self.write(pending).await?;
        }
        Ok(())
    }
}

impl StoreState {
    fn apply(&mut self, path: &str, value: Option<Value>) -> Result<(), StoreError> {
        match value {
            Some(v) => set_at_path(&mut self.root, path, v),
            None => {
                remove_at_path(&mut self.root, path);
                Ok(())
            }
        }?;
        *self.versions.entry(document_key(path)).or_insert(0) += 1;
        Ok(())
    }

    fn notify(&self, path: &str, value: Option<Value>) {
        let change = DocumentChange {
            path: path.to_string(),
            value,
        };
        for (subscribed, sender) in &self.channels {
            if paths_overlap(subscribed, path) {
                // A lagging or dropped receiver is the subscriber's problem.
                let _ = sender.send(change.clone());
            }
        }
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryDocumentStore {
    #[instrument(skip(self))]
    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let state = self.state.read().await;
        Ok(get_at_path(&state.root, path).cloned())
    }

    #[instrument(skip(self))]
    async fn read_with_version(&self, path: &str) -> Result<(Option<Value>, u64), StoreError> {
        let state = self.state.read().await;
        let version = state
            .versions
            .get(&document_key(path))
            .copied()
            .unwrap_or(0);
        Ok((get_at_path(&state.root, path).cloned(), version))
    }

    #[instrument(skip(self, updates), fields(paths = updates.len()))]
    async fn write(&self, updates: Vec<(String, Value)>) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        for (path, value) in &updates {
            state.apply(path, Some(value.clone()))?;
        }
        for (path, value) in updates {
            state.notify(&path, Some(value));
        }
        Ok(())
    }

    #[instrument(skip(self, updates), fields(paths = updates.len()))]
    async fn write_if_version(
        &self,
        key: &str,
        expected: u64,
        updates: Vec<(String, Value)>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let actual = state.versions.get(key).copied().unwrap_or(0);
        if actual != expected {
            warn!(key, expected, actual, "conditional write lost the race");
            return Err(StoreError::VersionConflict {
                path: key.to_string(),
                expected,
                actual,
            });
        }
        for (path, value) in &updates {
            state.apply(path, Some(value.clone()))?;
        }
        for (path, value) in updates {
            state.notify(&path, Some(value));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.apply(path, None)?;
        state.notify(path, None);
        Ok(())
    }

    async fn subscribe(&self, path: &str) -> broadcast::Receiver<DocumentChange> {
        let mut state = self.state.write().await;
        match state.channels.get(path) {
            Some(sender) => sender.subscribe(),
            None => {
                debug!(path, "creating change channel");
                let (sender, receiver) = broadcast::channel(CHANNEL_CAPACITY);
                state.channels.insert(path.to_string(), sender);
                receiver
            }
        }
    }

    #[instrument(skip(self, fallback))]
    async fn on_disconnect_cleanup(&self, path: &str, fallback: Value) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.cleanups.push((path.to_string(), fallback));
        Ok(())
    }
}

/// Whether a change at `written` is visible to a subscriber of `subscribed`:
/// one path is the other or an ancestor of the other.
fn paths_overlap(subscribed: &str, written: &str) -> bool {
    let a = subscribed.split('/');
    let b = written.split('/');
    a.zip(b).all(|(x, y)| x == y)
}

fn get_at_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('/') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn set_at_path(root: &mut Value, path: &str, value: Value) -> Result<(), StoreError> {
    let segments: Vec<&str> = path.split('/').collect();
    let mut current = root;
    for (i, segment) in segments.iter().enumerate() {
        let last = i == segments.len() - 1;
        match current {
            Value::Object(map) => {
                if last {
                    map.insert(segment.to_string(), value);
                    return Ok(());
                }
                current = map
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(serde_json::Map::new()));
            }
            Value::Array(items) => {
                let index: usize = segment
                    .parse()
                    .map_err(|_| StoreError::Backend(format!("bad array index in {}", path)))?;
                let slot = items
                    .get_mut(index)
                    .ok_or_else(|| StoreError::Backend(format!("index out of range in {}", path)))?;
                if last {
                    *slot = value;
                    return Ok(());
                }
                current = slot;
            }
            other => {
                // Intermediate scalar: replace it with an object and descend.
                *other = Value::Object(serde_json::Map::new());
                let Value::Object(map) = other else { unreachable!() };
                if last {
                    map.insert(segment.to_string(), value);
                    return Ok(());
                }
                current = map
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(serde_json::Map::new()));
            }
        }
    }
    Ok(())
}

fn remove_at_path(root: &mut Value, path: &str) {
    let segments: Vec<&str> = path.split('/').collect();
    let mut current = root;
    for (i, segment) in segments.iter().enumerate() {
        let last = i == segments.len() - 1;
        match current {
            Value::Object(map) => {
                if last {
                    map.remove(*segment);
                    return;
                }
                match map.get_mut(*segment) {
                    Some(next) => current = next,
                    None => return,
                }
            }
            Value::Array(items) => {
                let Ok(index) = segment.parse::<usize>() else { return };
                if last {
                    if index < items.len() {
                        items[index] = Value::Null;
                    }
                    return;
                }
                match items.get_mut(index) {
                    Some(next) => current = next,
                    None => return,
                }
            }
            _ => return,
        }
    }
}
