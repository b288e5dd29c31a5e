//! Read helpers that turn every storage failure into "absent".

use serde::de::DeserializeOwned;

use super::KeyValueStore;

/// Reads the raw value under `key`. I/O failures are logged and read as `None`.
pub async fn load_raw(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", key, e);
            None
        }
    }
}

/// Reads and deserializes the JSON snapshot under `key`.
///
/// Missing keys, I/O failures and malformed JSON all yield `None`.
pub async fn load_snapshot<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = load_raw(store, key).await?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed snapshot for {}: {}", key, e);
            None
        }
    }
}
