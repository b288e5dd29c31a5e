//! Favorite recipes, deduplicated by `idMeal`.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;

use super::PersistedCell;
use crate::models::MealPreview;
use crate::storage::{load_snapshot, KeyValueStore, SnapshotWriter, StoreKey};

pub struct FavoritesStore {
    cell: PersistedCell<Vec<MealPreview>>,
}

impl FavoritesStore {
    /// Loads the persisted favorites; a missing or unreadable snapshot
    /// starts an empty collection.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let key = StoreKey::Favorites.as_str();
        let stored: Vec<MealPreview> = load_snapshot(store.as_ref(), key)
            .await
            .unwrap_or_default();

        let mut seen = HashSet::new();
        let favorites: Vec<MealPreview> = stored
            .into_iter()
            .filter(|meal| seen.insert(meal.id_meal.clone()))
            .collect();
        tracing::debug!("Loaded {} favorite(s)", favorites.len());

        Self {
            cell: PersistedCell::new(
                favorites,
                SnapshotWriter::spawn(store, key),
                |favorites| serde_json::to_string(favorites),
            ),
        }
    }

    /// Removes `meal` if it is a favorite, adds it otherwise.
    ///
    /// Returns whether the meal is a favorite afterwards.
    pub fn toggle_favorite(&self, meal: MealPreview) -> bool {
        let mut now_favorite = false;
        self.cell.update(|favorites| {
            let before = favorites.len();
            favorites.retain(|f| f.id_meal != meal.id_meal);
            if favorites.len() == before {
                favorites.push(meal);
                now_favorite = true;
            }
            true
        });
        now_favorite
    }

    pub fn is_favorite(&self, id_meal: &str) -> bool {
        self.cell.borrow().iter().any(|f| f.id_meal == id_meal)
    }

    /// Favorites in the order they were added.
    pub fn favorites(&self) -> Vec<MealPreview> {
        self.cell.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.cell.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<MealPreview>> {
        self.cell.subscribe()
    }

    /// Waits for queued writes to reach storage.
    pub async fn flush(&self) {
        self.cell.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn meal(id: &str) -> MealPreview {
        MealPreview::new(id, format!("Meal {}", id), format!("{}.jpg", id))
    }

    async fn empty_store() -> (FavoritesStore, Arc<MemoryStore>) {
        let backing = Arc::new(MemoryStore::new());
        let store = FavoritesStore::load(backing.clone()).await;
        (store, backing)
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let (store, _) = empty_store().await;
        assert!(store.is_empty());
        assert!(!store.is_favorite("52771"));
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let (store, _) = empty_store().await;

        assert!(store.toggle_favorite(meal("1")));
        assert!(store.is_favorite("1"));
        assert_eq!(store.len(), 1);

        assert!(!store.toggle_favorite(meal("1")));
        assert!(!store.is_favorite("1"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_membership_follows_toggle_parity() {
        let (store, _) = empty_store().await;
        let sequence = ["1", "2", "1", "3", "1", "2", "2", "2"];
        for id in sequence {
            store.toggle_favorite(meal(id));
        }

        for id in ["1", "2", "3"] {
            let toggles = sequence.iter().filter(|s| **s == id).count();
            assert_eq!(store.is_favorite(id), toggles % 2 == 1, "meal {}", id);
        }

        let favorites = store.favorites();
        let unique: HashSet<_> = favorites.iter().map(|f| f.id_meal.clone()).collect();
        assert_eq!(unique.len(), favorites.len());
    }

    #[tokio::test]
    async fn test_toggle_matches_by_id_only() {
        let (store, _) = empty_store().await;
        store.toggle_favorite(meal("7"));
        let renamed = MealPreview::new("7", "Renamed", "other.jpg");
        assert!(!store.toggle_favorite(renamed));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_preserves_insertion_order() {
        let (store, _) = empty_store().await;
        store.toggle_favorite(meal("3"));
        store.toggle_favorite(meal("1"));
        store.toggle_favorite(meal("2"));
        let ids: Vec<_> = store.favorites().into_iter().map(|f| f.id_meal).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[tokio::test]
    async fn test_persists_and_reloads() {
        let (store, backing) = empty_store().await;
        store.toggle_favorite(meal("1"));
        store.toggle_favorite(meal("2"));
        store.flush().await;

        let reloaded = FavoritesStore::load(backing.clone()).await;
        assert_eq!(reloaded.favorites(), store.favorites());

        let raw = backing.get("@favorites").await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["idMeal"], "1");
    }

    #[tokio::test]
    async fn test_malformed_snapshot_starts_empty() {
        let backing = Arc::new(MemoryStore::new());
        backing.set("@favorites", "not json").await.unwrap();
        let store = FavoritesStore::load(backing).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_load_drops_duplicate_ids() {
        let backing = Arc::new(MemoryStore::new());
        let stored = serde_json::to_string(&vec![meal("1"), meal("1"), meal("2")]).unwrap();
        backing.set("@favorites", &stored).await.unwrap();

        let store = FavoritesStore::load(backing).await;
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (store, _) = empty_store().await;
        let mut rx = store.subscribe();

        store.toggle_favorite(meal("9"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
