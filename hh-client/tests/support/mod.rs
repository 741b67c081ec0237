//! In-process fake of the household backend for integration tests
//!
//! Serves the same REST routes as the real backend from an in-memory state,
//! records every request (with its JSON body), and fails any route listed in
//! `fail_routes` ("METHOD /path") with a 500.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use hh_client::HouseholdClient;
use hh_common::{DishwashingEvent, Item, Recipe, RecipeIngredient};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct BackendState {
    pub items: Vec<Item>,
    pub recipes: Vec<Recipe>,
    pub ingredients: Vec<RecipeIngredient>,
    pub events: Vec<DishwashingEvent>,
    pub turn: String,
    /// Answer `/dishwashing/turn` as text/plain instead of a JSON string
    pub turn_as_plain_text: bool,
    /// Routes that answer 500, e.g. "PUT /api/items/2"
    pub fail_routes: HashSet<String>,
    /// Answer updates and dishwashing records with 204 and no body
    pub empty_write_responses: bool,
    /// Ingredient creates beyond this count answer 500
    pub ingredient_create_limit: Option<usize>,
    pub ingredient_creates: usize,
    pub next_id: i64,
    pub requests: Vec<RecordedRequest>,
}

impl BackendState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }

    fn written<T: Serialize>(&self, value: T) -> Response {
        if self.empty_write_responses {
            StatusCode::NO_CONTENT.into_response()
        } else {
            Json(value).into_response()
        }
    }

    fn record(&mut self, method: &str, path: String, body: Option<&Value>) -> Result<(), StatusCode> {
        let failing = self.fail_routes.contains(&format!("{} {}", method, path));
        self.requests.push(RecordedRequest {
            method: method.to_string(),
            path,
            body: body.cloned(),
        });
        if failing {
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            Ok(())
        }
    }
}

type Shared = Arc<Mutex<BackendState>>;
type HandlerResult<T> = Result<Json<T>, StatusCode>;

pub fn item(id: i64, name: &str, on_list: bool) -> Item {
    Item {
        id: Some(id),
        name: name.to_string(),
        is_on_shopping_list: on_list,
    }
}

pub fn recipe(id: i64, name: &str, description: &str) -> Recipe {
    Recipe {
        id: Some(id),
        name: name.to_string(),
        description: description.to_string(),
    }
}

pub fn ingredient(id: i64, recipe_id: i64, item_id: i64, weight: &str, available: bool) -> RecipeIngredient {
    RecipeIngredient {
        id: Some(id),
        recipe_id,
        ingredient_id: item_id,
        weight: weight.to_string(),
        is_available: available,
    }
}

pub fn event(id: i64, name: &str, time: &str) -> DishwashingEvent {
    DishwashingEvent {
        id: Some(id),
        time: time.to_string(),
        name: Some(name.to_string()),
    }
}

pub struct FakeBackend {
    state: Shared,
    pub client: HouseholdClient,
}

impl FakeBackend {
    pub async fn start(state: BackendState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = HouseholdClient::new(format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        Self { state, client }
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut BackendState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn fail(&self, route: &str) {
        self.with_state(|s| s.fail_routes.insert(route.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.with_state(|s| s.requests.clone())
    }

    /// Recorded non-GET requests, in arrival order
    pub fn mutations(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != "GET")
            .collect()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn clear_requests(&self) {
        self.with_state(|s| s.requests.clear());
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/api/recipes/:id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .route("/api/recipeingredients", post(create_ingredient))
        .route(
            "/api/recipeingredients/:id",
            get(list_ingredients)
                .put(update_ingredient)
                .delete(delete_ingredient),
        )
        .route("/api/items", get(list_items).post(create_item))
        .route(
            "/api/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/api/dishwashing", get(list_events))
        .route("/api/dishwashing/turn", get(whose_turn))
        .route("/api/dishwashing/:person", post(record_event))
        .with_state(state)
}

fn parse<T: serde::de::DeserializeOwned>(body: &Value) -> Result<T, StatusCode> {
    serde_json::from_value(body.clone()).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)
}

// ========================================
// Recipes
// ========================================

async fn list_recipes(State(state): State<Shared>) -> HandlerResult<Vec<Recipe>> {
    let mut s = state.lock().unwrap();
    s.record("GET", "/api/recipes".to_string(), None)?;
    Ok(Json(s.recipes.clone()))
}

async fn get_recipe(State(state): State<Shared>, Path(id): Path<i64>) -> HandlerResult<Recipe> {
    let mut s = state.lock().unwrap();
    s.record("GET", format!("/api/recipes/{}", id), None)?;
    s.recipes
        .iter()
        .find(|r| r.id == Some(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_recipe(State(state): State<Shared>, Json(body): Json<Value>) -> HandlerResult<Recipe> {
    let mut s = state.lock().unwrap();
    s.record("POST", "/api/recipes".to_string(), Some(&body))?;
    let mut recipe: Recipe = parse(&body)?;
    recipe.id = Some(s.allocate_id());
    s.recipes.push(recipe.clone());
    Ok(Json(recipe))
}

async fn update_recipe(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, StatusCode> {
    let mut s = state.lock().unwrap();
    s.record("PUT", format!("/api/recipes/{}", id), Some(&body))?;
    let mut recipe: Recipe = parse(&body)?;
    recipe.id = Some(id);
    let slot = s
        .recipes
        .iter_mut()
        .find(|r| r.id == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = recipe.clone();
    Ok(s.written(recipe))
}

async fn delete_recipe(State(state): State<Shared>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut s = state.lock().unwrap();
    s.record("DELETE", format!("/api/recipes/{}", id), None)?;
    let before = s.recipes.len();
    s.recipes.retain(|r| r.id != Some(id));
    if s.recipes.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    s.ingredients.retain(|ri| ri.recipe_id != id);
    Ok(StatusCode::NO_CONTENT)
}

// ========================================
// Recipe ingredients
// ========================================

async fn list_ingredients(
    State(state): State<Shared>,
    Path(recipe_id): Path<i64>,
) -> HandlerResult<Vec<RecipeIngredient>> {
    let mut s = state.lock().unwrap();
    s.record("GET", format!("/api/recipeingredients/{}", recipe_id), None)?;
    Ok(Json(
        s.ingredients
            .iter()
            .filter(|ri| ri.recipe_id == recipe_id)
            .cloned()
            .collect(),
    ))
}

async fn create_ingredient(State(state): State<Shared>, Json(body): Json<Value>) -> HandlerResult<RecipeIngredient> {
    let mut s = state.lock().unwrap();
    s.record("POST", "/api/recipeingredients".to_string(), Some(&body))?;
    if let Some(limit) = s.ingredient_create_limit {
        if s.ingredient_creates >= limit {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
    let mut row: RecipeIngredient = parse(&body)?;
    row.id = Some(s.allocate_id());
    s.ingredient_creates += 1;
    s.ingredients.push(row.clone());
    Ok(Json(row))
}

async fn update_ingredient(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, StatusCode> {
    let mut s = state.lock().unwrap();
    s.record("PUT", format!("/api/recipeingredients/{}", id), Some(&body))?;
    let mut row: RecipeIngredient = parse(&body)?;
    row.id = Some(id);
    let slot = s
        .ingredients
        .iter_mut()
        .find(|ri| ri.id == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = row.clone();
    Ok(s.written(row))
}

async fn delete_ingredient(State(state): State<Shared>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut s = state.lock().unwrap();
    s.record("DELETE", format!("/api/recipeingredients/{}", id), None)?;
    let before = s.ingredients.len();
    s.ingredients.retain(|ri| ri.id != Some(id));
    if s.ingredients.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ========================================
// Items
// ========================================

async fn list_items(State(state): State<Shared>) -> HandlerResult<Vec<Item>> {
    let mut s = state.lock().unwrap();
    s.record("GET", "/api/items".to_string(), None)?;
    Ok(Json(s.items.clone()))
}

async fn get_item(State(state): State<Shared>, Path(id): Path<i64>) -> HandlerResult<Item> {
    let mut s = state.lock().unwrap();
    s.record("GET", format!("/api/items/{}", id), None)?;
    s.items
        .iter()
        .find(|i| i.id == Some(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_item(State(state): State<Shared>, Json(body): Json<Value>) -> HandlerResult<Item> {
    let mut s = state.lock().unwrap();
    s.record("POST", "/api/items".to_string(), Some(&body))?;
    let mut item: Item = parse(&body)?;
    item.id = Some(s.allocate_id());
    s.items.push(item.clone());
    Ok(Json(item))
}

async fn update_item(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, StatusCode> {
    let mut s = state.lock().unwrap();
    s.record("PUT", format!("/api/items/{}", id), Some(&body))?;
    let mut item: Item = parse(&body)?;
    item.id = Some(id);
    let slot = s
        .items
        .iter_mut()
        .find(|i| i.id == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = item.clone();
    Ok(s.written(item))
}

async fn delete_item(State(state): State<Shared>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut s = state.lock().unwrap();
    s.record("DELETE", format!("/api/items/{}", id), None)?;
    let before = s.items.len();
    s.items.retain(|i| i.id != Some(id));
    if s.items.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ========================================
// Dishwashing
// ========================================

async fn list_events(State(state): State<Shared>) -> HandlerResult<Vec<DishwashingEvent>> {
    let mut s = state.lock().unwrap();
    s.record("GET", "/api/dishwashing".to_string(), None)?;
    Ok(Json(s.events.clone()))
}

async fn whose_turn(State(state): State<Shared>) -> Result<Response, StatusCode> {
    let mut s = state.lock().unwrap();
    s.record("GET", "/api/dishwashing/turn".to_string(), None)?;
    if s.turn_as_plain_text {
        Ok((StatusCode::OK, s.turn.clone()).into_response())
    } else {
        Ok(Json(s.turn.clone()).into_response())
    }
}

async fn record_event(State(state): State<Shared>, Path(person): Path<String>) -> Result<Response, StatusCode> {
    let mut s = state.lock().unwrap();
    s.record("POST", format!("/api/dishwashing/{}", person), None)?;
    let (name, next) = match person.as_str() {
        "marci" => ("Marci", "Reka"),
        "reka" => ("Reka", "Marci"),
        _ => return Err(StatusCode::NOT_FOUND),
    };

    let id = s.allocate_id();
    let day = s.events.len() + 1;
    let event = DishwashingEvent {
        id: Some(id),
        time: format!("2024-07-{:02}T20:00:00", day),
        name: Some(name.to_string()),
    };
    s.events.push(event.clone());
    s.turn = next.to_string();
    Ok(s.written(event))
}
