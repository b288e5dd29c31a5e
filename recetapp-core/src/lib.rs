//! Recetapp Core Library
//!
//! Recipe models, the locally persisted stores (favorites, fridges, theme),
//! the remote recipe service client and the search coordination used by
//! Recetapp front ends.

pub mod models;
pub mod search;
pub mod service;
pub mod storage;
pub mod stores;

pub use models::{
    Appearance, Category, Fridge, Ingredient, Meal, MealPreview, MeasuredIngredient,
    RawIngredient, ThemePreference,
};
pub use search::{IngredientCatalog, SearchCoordinator, SearchPhase, SearchSettings, SearchState};
pub use service::{MealDbClient, RecipeService, ServiceError, DEFAULT_BASE_URL};
pub use storage::{
    FileStore, KeyValueStore, MemoryStore, SnapshotWriter, StorageError, StoreKey,
};
pub use stores::{FavoritesStore, FridgeStore, ThemeStore};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
