//! Typed client for the household REST backend
//!
//! Every endpoint lives under `{base_url}/api`. There is no retry and no
//! authentication; the only protection against a hung backend is the
//! per-request timeout.

use hh_common::config::ClientConfig;
use hh_common::{DishwashingEvent, Item, Person, Recipe, RecipeIngredient};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::ApiError;

const USER_AGENT: &str = concat!("household/", env!("CARGO_PKG_VERSION"));

/// Household REST API client
#[derive(Debug, Clone)]
pub struct HouseholdClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HouseholdClient {
    /// `base_url` is the backend root without the `/api` prefix
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "API request");

        let mut request = self.http_client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::Api(status.as_u16(), error_text));
        }

        Ok(response)
    }

    async fn request_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(method, path, body)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json::<(), T>(Method::GET, path, None).await
    }

    /// Request whose response body is not read; any 2xx counts as success
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        self.send(method, path, body).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute::<()>(Method::DELETE, path, None).await
    }

    // ========================================
    // Recipes
    // ========================================

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        self.get_json("/recipes").await
    }

    pub async fn get_recipe(&self, id: i64) -> Result<Recipe, ApiError> {
        self.get_json(&format!("/recipes/{}", id)).await
    }

    pub async fn create_recipe(&self, recipe: &Recipe) -> Result<Recipe, ApiError> {
        self.request_json(Method::POST, "/recipes", Some(recipe)).await
    }

    pub async fn update_recipe(&self, id: i64, recipe: &Recipe) -> Result<(), ApiError> {
        self.execute(Method::PUT, &format!("/recipes/{}", id), Some(recipe))
            .await
    }

    pub async fn delete_recipe(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/recipes/{}", id)).await
    }

    // ========================================
    // Recipe ingredients
    // ========================================

    /// All ingredient rows of one recipe
    ///
    /// Note the path takes the recipe id, while PUT/DELETE on the same path
    /// take the ingredient row id.
    pub async fn list_recipe_ingredients(&self, recipe_id: i64) -> Result<Vec<RecipeIngredient>, ApiError> {
        self.get_json(&format!("/recipeingredients/{}", recipe_id)).await
    }

    pub async fn create_recipe_ingredient(
        &self,
        ingredient: &RecipeIngredient,
    ) -> Result<RecipeIngredient, ApiError> {
        self.request_json(Method::POST, "/recipeingredients", Some(ingredient))
            .await
    }

    pub async fn update_recipe_ingredient(
        &self,
        id: i64,
        ingredient: &RecipeIngredient,
    ) -> Result<(), ApiError> {
        self.execute(Method::PUT, &format!("/recipeingredients/{}", id), Some(ingredient))
            .await
    }

    pub async fn delete_recipe_ingredient(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/recipeingredients/{}", id)).await
    }

    // ========================================
    // Items
    // ========================================

    pub async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        self.get_json("/items").await
    }

    pub async fn get_item(&self, id: i64) -> Result<Item, ApiError> {
        self.get_json(&format!("/items/{}", id)).await
    }

    pub async fn create_item(&self, item: &Item) -> Result<Item, ApiError> {
        self.request_json(Method::POST, "/items", Some(item)).await
    }

    pub async fn update_item(&self, id: i64, item: &Item) -> Result<(), ApiError> {
        self.execute(Method::PUT, &format!("/items/{}", id), Some(item))
            .await
    }

    pub async fn delete_item(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/items/{}", id)).await
    }

    // ========================================
    // Dishwashing
    // ========================================

    pub async fn list_dishwashing_events(&self) -> Result<Vec<DishwashingEvent>, ApiError> {
        self.get_json("/dishwashing").await
    }

    /// Server-computed name of whoever is due next
    ///
    /// Accepts both a JSON string body and plain text.
    pub async fn whose_turn(&self) -> Result<String, ApiError> {
        let body = self
            .send::<()>(Method::GET, "/dishwashing/turn", None)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(parse_turn_body(&body))
    }

    /// The stored event is not read back; callers refetch the log
    pub async fn record_dishwashing(&self, person: Person) -> Result<(), ApiError> {
        self.execute::<()>(Method::POST, &format!("/dishwashing/{}", person.slug()), None)
            .await?;

        tracing::info!(person = %person, "Recorded dishwashing event");
        Ok(())
    }
}

fn parse_turn_body(body: &str) -> String {
    match serde_json::from_str::<String>(body) {
        Ok(name) => name,
        Err(_) => body.trim().to_string(),
    }
}
