//! HTTP client for the recipe lookup API.
//!
//! Every failure is logged here, where the endpoint is known; callers only
//! need to decide what to show.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{RecipeService, ServiceError};
use crate::models::{
    CategoriesResponse, Category, IngredientListResponse, Meal, MealPreview, MealPreviewsResponse,
    MealsResponse, RawIngredient,
};

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1/";

#[derive(Debug, Clone)]
pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
}

impl MealDbClient {
    /// Creates a client for `base_url`; a trailing `/` is added if missing.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str, query: Option<(&str, &str)>) -> String {
        match query {
            Some((name, value)) => format!(
                "{}{}?{}={}",
                self.base_url,
                endpoint,
                name,
                urlencoding::encode(value)
            ),
            None => format!("{}{}", self.base_url, endpoint),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: Option<(&str, &str)>,
    ) -> Result<T, ServiceError> {
        let url = self.url(endpoint, query);
        tracing::debug!("GET {}", url);

        let result = self.get_json(endpoint, &url).await;
        if let Err(e) = &result {
            tracing::error!("Request to {} failed: {}", endpoint, e);
        }
        result
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
    ) -> Result<T, ServiceError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status { endpoint, status });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RecipeService for MealDbClient {
    async fn search_by_name(&self, query: &str) -> Result<Vec<Meal>, ServiceError> {
        let response: MealsResponse = self.fetch("search.php", Some(("s", query))).await?;
        Ok(response.meals.unwrap_or_default())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
        let response: CategoriesResponse = self.fetch("categories.php", None).await?;
        Ok(response.categories.unwrap_or_default())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<MealPreview>, ServiceError> {
        let response: MealPreviewsResponse =
            self.fetch("filter.php", Some(("c", category))).await?;
        Ok(response.meals.unwrap_or_default())
    }

    async fn recipe_by_id(&self, id: &str) -> Result<Option<Meal>, ServiceError> {
        let response: MealsResponse = self.fetch("lookup.php", Some(("i", id))).await?;
        Ok(response.meals.and_then(|meals| meals.into_iter().next()))
    }

    async fn list_ingredients(&self) -> Result<Vec<RawIngredient>, ServiceError> {
        let response: IngredientListResponse =
            self.fetch("list.php", Some(("i", "list"))).await?;
        Ok(response.meals.unwrap_or_default())
    }
}
