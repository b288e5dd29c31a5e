//! Cached ingredient catalog with substring search.
//!
//! The full catalog is fetched once and reused for every search until
//! [`IngredientCatalog::refresh`] is called. Failed fetches are not cached.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::models::Ingredient;
use crate::service::{RecipeService, ServiceError};

pub struct IngredientCatalog<S> {
    service: Arc<S>,
    cache: Mutex<Option<Arc<Vec<Ingredient>>>>,
}

impl<S: RecipeService> IngredientCatalog<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            cache: Mutex::new(None),
        }
    }

    /// Returns the catalog, fetching it on first use.
    ///
    /// Concurrent callers wait for a single fetch.
    pub async fn ingredients(&self) -> Result<Arc<Vec<Ingredient>>, ServiceError> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let fetched: Vec<Ingredient> = self
            .service
            .list_ingredients()
            .await?
            .into_iter()
            .map(Ingredient::from)
            .collect();
        tracing::info!("Cached {} ingredient(s)", fetched.len());

        let fetched = Arc::new(fetched);
        *cache = Some(Arc::clone(&fetched));
        Ok(fetched)
    }

    /// Case-insensitive substring match on ingredient names, in catalog
    /// order. A blank query matches nothing and does not touch the network.
    pub async fn search(&self, query: &str) -> Result<Vec<Ingredient>, ServiceError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let catalog = self.ingredients().await?;
        Ok(catalog
            .iter()
            .filter(|i| i.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    /// Drops the cached catalog and fetches it again.
    pub async fn refresh(&self) -> Result<usize, ServiceError> {
        self.invalidate().await;
        Ok(self.ingredients().await?.len())
    }

    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    pub async fn is_cached(&self) -> bool {
        self.cache.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Meal, MealPreview, RawIngredient};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingService {
        fetches: AtomicUsize,
        failing: AtomicBool,
    }

    fn raw(id: &str, name: &str) -> RawIngredient {
        RawIngredient {
            id_ingredient: id.to_string(),
            str_ingredient: name.to_string(),
            str_description: None,
            str_type: None,
        }
    }

    #[async_trait]
    impl RecipeService for CountingService {
        async fn search_by_name(&self, _: &str) -> Result<Vec<Meal>, ServiceError> {
            Ok(Vec::new())
        }

        async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
            Ok(Vec::new())
        }

        async fn list_by_category(&self, _: &str) -> Result<Vec<MealPreview>, ServiceError> {
            Ok(Vec::new())
        }

        async fn recipe_by_id(&self, _: &str) -> Result<Option<Meal>, ServiceError> {
            Ok(None)
        }

        async fn list_ingredients(&self) -> Result<Vec<RawIngredient>, ServiceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(ServiceError::Decode {
                    endpoint: "list.php",
                    message: "unexpected EOF".to_string(),
                });
            }
            Ok(vec![
                raw("1", "Chicken"),
                raw("2", "Salmon"),
                raw("3", "Chicken Breast"),
                raw("4", "Tomato Puree"),
                raw("5", "Tomatoes"),
            ])
        }
    }

    fn names(ingredients: &[Ingredient]) -> Vec<&str> {
        ingredients.iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let catalog = IngredientCatalog::new(Arc::new(CountingService::default()));

        let found = catalog.search("CHICK").await.unwrap();
        assert_eq!(names(&found), vec!["Chicken", "Chicken Breast"]);

        let found = catalog.search("mato").await.unwrap();
        assert_eq!(names(&found), vec!["Tomato Puree", "Tomatoes"]);
        assert_eq!(found[0].id, "4");
    }

    #[tokio::test]
    async fn test_catalog_fetched_once() {
        let service = Arc::new(CountingService::default());
        let catalog = IngredientCatalog::new(Arc::clone(&service));

        for query in ["c", "ch", "chi", "chic", "salmon"] {
            catalog.search(query).await.unwrap();
        }
        assert_eq!(service.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_query_skips_fetch() {
        let service = Arc::new(CountingService::default());
        let catalog = IngredientCatalog::new(Arc::clone(&service));

        assert!(catalog.search("   ").await.unwrap().is_empty());
        assert_eq!(service.fetches.load(Ordering::SeqCst), 0);
        assert!(!catalog.is_cached().await);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let service = Arc::new(CountingService::default());
        service.failing.store(true, Ordering::SeqCst);
        let catalog = IngredientCatalog::new(Arc::clone(&service));

        assert!(catalog.search("salmon").await.is_err());
        assert!(!catalog.is_cached().await);

        service.failing.store(false, Ordering::SeqCst);
        assert_eq!(catalog.search("salmon").await.unwrap().len(), 1);
        assert_eq!(service.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_refetches() {
        let service = Arc::new(CountingService::default());
        let catalog = IngredientCatalog::new(Arc::clone(&service));

        catalog.search("salmon").await.unwrap();
        assert_eq!(catalog.refresh().await.unwrap(), 5);
        catalog.search("salmon").await.unwrap();
        assert_eq!(service.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_searches_share_one_fetch() {
        let service = Arc::new(CountingService::default());
        let catalog = Arc::new(IngredientCatalog::new(Arc::clone(&service)));

        let handles: Vec<_> = ["chicken", "salmon", "tomato", "breast"]
            .into_iter()
            .map(|q| {
                let catalog = Arc::clone(&catalog);
                tokio::spawn(async move { catalog.search(q).await.unwrap().len() })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(service.fetches.load(Ordering::SeqCst), 1);
    }
}
