//! Fridge inventories.
//!
//! Mutations build a new collection from the current one and swap it in;
//! fridges are never edited in place. Operations on an unknown fridge id
//! leave the collection untouched and report `false`.

use std::sync::Arc;
use tokio::sync::watch;

use super::PersistedCell;
use crate::models::{Fridge, Ingredient};
use crate::storage::{load_snapshot, KeyValueStore, SnapshotWriter, StoreKey};

pub struct FridgeStore {
    cell: PersistedCell<Vec<Fridge>>,
}

impl FridgeStore {
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let key = StoreKey::Fridges.as_str();
        let fridges: Vec<Fridge> = load_snapshot(store.as_ref(), key)
            .await
            .unwrap_or_default();
        tracing::debug!("Loaded {} fridge(s)", fridges.len());

        Self {
            cell: PersistedCell::new(
                fridges,
                SnapshotWriter::spawn(store, key),
                |fridges| serde_json::to_string(fridges),
            ),
        }
    }

    fn apply(&self, transform: impl FnOnce(&[Fridge]) -> Option<Vec<Fridge>>) -> bool {
        self.cell.update(|fridges| match transform(fridges) {
            Some(next) => {
                *fridges = next;
                true
            }
            None => false,
        })
    }

    /// Replaces the fridge `fridge_id` with `change(fridge)`. `change`
    /// returns `None` when there is nothing to do.
    fn replace_fridge(
        &self,
        fridge_id: &str,
        change: impl FnOnce(&Fridge) -> Option<Fridge>,
    ) -> bool {
        self.apply(|fridges| {
            let index = fridges.iter().position(|f| f.id == fridge_id)?;
            let updated = change(&fridges[index])?;
            let mut next = fridges.to_vec();
            next[index] = updated;
            Some(next)
        })
    }

    /// Creates an empty fridge at the front of the collection.
    ///
    /// Blank names are ignored. Returns the new fridge's id.
    pub fn create_fridge(&self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("Ignoring fridge with blank name");
            return None;
        }

        let fridge = Fridge::new(name);
        let id = fridge.id.clone();
        self.apply(|fridges| {
            let mut next = Vec::with_capacity(fridges.len() + 1);
            next.push(fridge);
            next.extend_from_slice(fridges);
            Some(next)
        });
        Some(id)
    }

    pub fn add_ingredient(&self, fridge_id: &str, ingredient: Ingredient) -> bool {
        self.replace_fridge(fridge_id, |fridge| {
            Some(fridge.with_ingredient(ingredient))
        })
    }

    /// Removes every entry with `ingredient_id` from the fridge.
    pub fn remove_ingredient(&self, fridge_id: &str, ingredient_id: &str) -> bool {
        self.replace_fridge(fridge_id, |fridge| {
            fridge
                .contains(ingredient_id)
                .then(|| fridge.without_ingredient(ingredient_id))
        })
    }

    pub fn clear_fridge(&self, fridge_id: &str) -> bool {
        self.replace_fridge(fridge_id, |fridge| {
            (!fridge.ingredients.is_empty()).then(|| fridge.cleared())
        })
    }

    /// Deletes the fridge and its ingredients. Unknown ids are a no-op.
    pub fn delete_fridge(&self, fridge_id: &str) -> bool {
        self.apply(|fridges| {
            fridges.iter().any(|f| f.id == fridge_id).then(|| {
                fridges
                    .iter()
                    .filter(|f| f.id != fridge_id)
                    .cloned()
                    .collect()
            })
        })
    }

    /// All fridges, most recently created first.
    pub fn fridges(&self) -> Vec<Fridge> {
        self.cell.borrow().clone()
    }

    pub fn fridge(&self, fridge_id: &str) -> Option<Fridge> {
        self.cell.borrow().iter().find(|f| f.id == fridge_id).cloned()
    }

    /// Finds a fridge by id, or failing that by case-insensitive name.
    pub fn find(&self, identifier: &str) -> Option<Fridge> {
        let wanted = identifier.trim().to_lowercase();
        let fridges = self.cell.borrow();
        fridges
            .iter()
            .find(|f| f.id == identifier)
            .or_else(|| {
                fridges
                    .iter()
                    .find(|f| f.name.to_lowercase() == wanted)
            })
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.cell.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Fridge>> {
        self.cell.subscribe()
    }

    pub async fn flush(&self) {
        self.cell.flush().await
    }
}
