//! Remote recipe service (TheMealDB-compatible JSON API).

mod client;
mod error;

use async_trait::async_trait;

use crate::models::{Category, Meal, MealPreview, RawIngredient};

pub use client::{MealDbClient, DEFAULT_BASE_URL};
pub use error::ServiceError;

/// Read-only recipe lookups.
///
/// A `null` result list from the service is returned as an empty `Vec`, so
/// an empty result and a failure stay distinguishable through `Result`.
#[async_trait]
pub trait RecipeService: Send + Sync {
    async fn search_by_name(&self, query: &str) -> Result<Vec<Meal>, ServiceError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError>;

    async fn list_by_category(&self, category: &str) -> Result<Vec<MealPreview>, ServiceError>;

    /// Returns the first matching recipe, if any.
    async fn recipe_by_id(&self, id: &str) -> Result<Option<Meal>, ServiceError>;

    async fn list_ingredients(&self) -> Result<Vec<RawIngredient>, ServiceError>;

    /// Finds a category by its exact name.
    async fn find_category(&self, name: &str) -> Result<Option<Category>, ServiceError> {
        Ok(self
            .list_categories()
            .await?
            .into_iter()
            .find(|c| c.str_category == name))
    }
}
