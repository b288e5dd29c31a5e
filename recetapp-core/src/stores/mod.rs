//! Locally persisted application state.
//!
//! Each store owns its state in a `watch` channel, so front ends observe
//! changes through [`subscribe`](FavoritesStore::subscribe) receivers
//! instead of polling. Every change re-serializes the full state and queues
//! it on the store's [`SnapshotWriter`](crate::storage::SnapshotWriter)
//! while the new value is still locked, keeping storage writes in mutation
//! order.

mod favorites;
mod fridges;
mod theme;

pub use favorites::FavoritesStore;
pub use fridges::FridgeStore;
pub use theme::ThemeStore;

use tokio::sync::watch;

use crate::storage::SnapshotWriter;

type Encoder<T> = fn(&T) -> Result<String, serde_json::Error>;

/// A watched value mirrored to storage on every change.
struct PersistedCell<T> {
    state: watch::Sender<T>,
    writer: SnapshotWriter,
    encode: Encoder<T>,
}

impl<T> PersistedCell<T> {
    fn new(initial: T, writer: SnapshotWriter, encode: Encoder<T>) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            writer,
            encode,
        }
    }

    /// Applies `change`; when it reports a modification, subscribers are
    /// notified and the new snapshot is queued for writing.
    fn update(&self, change: impl FnOnce(&mut T) -> bool) -> bool {
        self.state.send_if_modified(|value| {
            if !change(value) {
                return false;
            }
            match (self.encode)(value) {
                Ok(snapshot) => self.writer.write(snapshot),
                Err(e) => tracing::warn!("Failed to encode {}: {}", self.writer.key(), e),
            }
            true
        })
    }

    fn borrow(&self) -> watch::Ref<'_, T> {
        self.state.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }

    async fn flush(&self) {
        self.writer.flush().await
    }
}
