//! Serialized, best-effort snapshot writes for one storage key.
//!
//! A single background task owns all writes to its key and applies them in
//! the order they were queued. When several snapshots are waiting, only the
//! newest one is written.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use super::KeyValueStore;

enum WriteCommand {
    Write(String),
    Flush(oneshot::Sender<()>),
}

/// Handle to the write queue of one key.
///
/// Must be created inside a Tokio runtime.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    key: String,
    tx: mpsc::UnboundedSender<WriteCommand>,
}

impl SnapshotWriter {
    pub fn spawn(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(store, key.clone(), rx));
        Self { key, tx }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Queues `value` to be written. Never blocks and never fails; a write
    /// that cannot reach storage is logged and dropped.
    pub fn write(&self, value: String) {
        if self.tx.send(WriteCommand::Write(value)).is_err() {
            tracing::warn!("Write queue for {} is closed, dropping snapshot", self.key);
        }
    }

    /// Waits until every write queued before this call has been attempted.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(WriteCommand::Flush(ack)).is_err() {
            return;
        }
        let _ = done.await;
    }
}

async fn run(
    store: Arc<dyn KeyValueStore>,
    key: String,
    mut rx: mpsc::UnboundedReceiver<WriteCommand>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            WriteCommand::Write(mut value) => {
                let mut pending_flush = None;
                while let Ok(next) = rx.try_recv() {
                    match next {
                        WriteCommand::Write(newer) => value = newer,
                        WriteCommand::Flush(ack) => {
                            pending_flush = Some(ack);
                            break;
                        }
                    }
                }

                if let Err(e) = store.set(&key, &value).await {
                    tracing::warn!("Failed to persist {}: {}", key, e);
                } else {
                    tracing::debug!("Persisted {} ({} bytes)", key, value.len());
                }

                if let Some(ack) = pending_flush {
                    let _ = ack.send(());
                }
            }
            WriteCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}
