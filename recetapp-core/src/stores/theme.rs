//! Theme preference, persisted as its bare literal.

use std::sync::Arc;
use tokio::sync::watch;

use super::PersistedCell;
use crate::models::{Appearance, ThemePreference};
use crate::storage::{load_raw, KeyValueStore, SnapshotWriter, StoreKey};

pub struct ThemeStore {
    cell: PersistedCell<ThemePreference>,
}

impl ThemeStore {
    /// Loads the saved preference. Unknown values fall back to `auto`.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let key = StoreKey::Theme.as_str();
        let preference = match load_raw(store.as_ref(), key).await {
            Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring saved theme: {}", e);
                ThemePreference::default()
            }),
            None => ThemePreference::default(),
        };

        Self {
            cell: PersistedCell::new(preference, SnapshotWriter::spawn(store, key), |theme| {
                Ok(theme.to_string())
            }),
        }
    }

    pub fn preference(&self) -> ThemePreference {
        *self.cell.borrow()
    }

    pub fn set_preference(&self, preference: ThemePreference) {
        self.cell.update(|current| {
            if *current == preference {
                return false;
            }
            *current = preference;
            true
        });
    }

    /// Advances auto -> light -> dark -> auto and returns the new value.
    pub fn toggle(&self) -> ThemePreference {
        let mut next = ThemePreference::default();
        self.cell.update(|current| {
            *current = current.next();
            next = *current;
            true
        });
        next
    }

    /// The appearance to render with, given what the device reports.
    pub fn effective(&self, system: Option<Appearance>) -> Appearance {
        self.preference().resolve(system)
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemePreference> {
        self.cell.subscribe()
    }

    pub async fn flush(&self) {
        self.cell.flush().await
    }
}
