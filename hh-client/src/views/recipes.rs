//! Recipe list and recipe detail views

use hh_common::{Recipe, RecipeIngredient};

use super::surface;
use crate::api::HouseholdClient;
use crate::catalog::ItemCatalog;
use crate::reconcile::{added_to_shopping_list, availability_toggled, join_ingredients, IngredientRow};
use crate::tracker::{InFlight, RowState};

/// All recipes
#[derive(Debug, Default)]
pub struct RecipeListView {
    recipes: Vec<Recipe>,
    loaded: bool,
    error: Option<String>,
}

impl RecipeListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh(&mut self, api: &HouseholdClient) {
        match api.list_recipes().await {
            Ok(recipes) => {
                self.recipes = recipes;
                self.loaded = true;
                self.error = None;
            }
            Err(e) => surface(&mut self.error, "Failed to fetch recipes", &e),
        }
    }

    pub async fn delete(&mut self, api: &HouseholdClient, recipe_id: i64) {
        match api.delete_recipe(recipe_id).await {
            Ok(()) => {
                tracing::info!(recipe_id, "Deleted recipe");
                self.refresh(api).await;
            }
            Err(e) => surface(&mut self.error, "Failed to delete recipe", &e),
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// One recipe with its ingredients joined against the item catalog
///
/// Two independent toggles live here: ingredient availability (tracked per
/// ingredient row id) and the item's shopping-list flag (tracked per item id).
#[derive(Debug)]
pub struct RecipeDetailView {
    recipe_id: i64,
    recipe: Option<Recipe>,
    ingredients: Vec<RecipeIngredient>,
    catalog: ItemCatalog,
    availability: InFlight<i64>,
    shopping: InFlight<i64>,
    error: Option<String>,
}

impl RecipeDetailView {
    pub fn new(recipe_id: i64) -> Self {
        Self {
            recipe_id,
            recipe: None,
            ingredients: Vec::new(),
            catalog: ItemCatalog::new(),
            availability: InFlight::new(),
            shopping: InFlight::new(),
            error: None,
        }
    }

    /// Fetch recipe, ingredient rows and item catalog concurrently
    ///
    /// Each part is stored as soon as the joined future completes; the join
    /// in [`rows`](Self::rows) is computed from whatever is present.
    pub async fn load(&mut self, api: &HouseholdClient) {
        let (recipe, ingredients, items) = tokio::join!(
            api.get_recipe(self.recipe_id),
            api.list_recipe_ingredients(self.recipe_id),
            api.list_items(),
        );
        self.error = None;

        // Lowest precedence first: a recipe failure is the message that stays
        match items {
            Ok(items) => self.catalog.replace(items),
            Err(e) => surface(&mut self.error, "Failed to fetch items", &e),
        }
        match ingredients {
            Ok(ingredients) => self.ingredients = ingredients,
            Err(e) => surface(&mut self.error, "Failed to fetch recipe ingredients", &e),
        }
        match recipe {
            Ok(recipe) => self.recipe = Some(recipe),
            Err(e) => surface(&mut self.error, "Failed to fetch recipe", &e),
        }
    }

    pub async fn refresh_ingredients(&mut self, api: &HouseholdClient) {
        match api.list_recipe_ingredients(self.recipe_id).await {
            Ok(ingredients) => self.ingredients = ingredients,
            Err(e) => surface(&mut self.error, "Failed to fetch recipe ingredients", &e),
        }
    }

    /// Flip one ingredient row's availability
    ///
    /// Only the ingredient row is sent; the referenced item keeps its
    /// shopping-list flag.
    pub async fn toggle_availability(&mut self, api: &HouseholdClient, ingredient_row_id: i64) {
        let Some(row) = self.ingredient(ingredient_row_id).cloned() else {
            self.error = Some(format!(
                "Ingredient {} is not part of this recipe",
                ingredient_row_id
            ));
            tracing::error!(ingredient_row_id, recipe_id = self.recipe_id, "Recipe ingredient not found");
            return;
        };

        self.availability.begin(ingredient_row_id);
        let body = availability_toggled(&row);

        match api.update_recipe_ingredient(ingredient_row_id, &body).await {
            Ok(()) => {
                tracing::info!(
                    ingredient_row_id,
                    available = body.is_available,
                    "Updated ingredient availability"
                );
                self.refresh_ingredients(api).await;
                self.availability.finish(ingredient_row_id, true);
            }
            Err(e) => {
                self.availability.finish(ingredient_row_id, false);
                surface(&mut self.error, "Failed to update ingredient availability", &e);
            }
        }
    }

    /// Put a catalog item on the shopping list
    ///
    /// No-op when the item is already flagged, matching the hidden action.
    pub async fn add_to_shopping_list(&mut self, api: &HouseholdClient, item_id: i64) {
        let Some(item) = self.catalog.get(item_id).cloned() else {
            self.error = Some(format!("Item {} not found", item_id));
            tracing::error!(item_id, "Item not found in catalog");
            return;
        };
        if item.is_on_shopping_list {
            tracing::debug!(item_id, "Item already on shopping list");
            return;
        }

        self.shopping.begin(item_id);
        let result = self.catalog.update(api, &added_to_shopping_list(&item)).await;
        self.shopping.finish(item_id, result.is_ok());

        if let Err(e) = result {
            surface(&mut self.error, "Failed to update item", &e);
        }
    }

    /// Add one ingredient row to this recipe, then refetch the rows
    pub async fn add_ingredient(
        &mut self,
        api: &HouseholdClient,
        item_id: i64,
        weight: &str,
        is_available: bool,
    ) {
        if weight.trim().is_empty() {
            self.error = Some("Quantity is required".to_string());
            return;
        }
        if self.catalog.is_loaded() && self.catalog.get(item_id).is_none() {
            self.error = Some(format!("Item {} not found", item_id));
            return;
        }

        let row = RecipeIngredient {
            id: None,
            recipe_id: self.recipe_id,
            ingredient_id: item_id,
            weight: weight.trim().to_string(),
            is_available,
        };
        match api.create_recipe_ingredient(&row).await {
            Ok(created) => {
                tracing::info!(recipe_id = self.recipe_id, item_id, row_id = ?created.id, "Added ingredient");
                self.refresh_ingredients(api).await;
            }
            Err(e) => surface(&mut self.error, "Failed to add ingredient", &e),
        }
    }

    /// Delete one ingredient row, then refetch the rows
    pub async fn remove_ingredient(&mut self, api: &HouseholdClient, ingredient_row_id: i64) {
        if self.ingredient(ingredient_row_id).is_none() {
            self.error = Some(format!(
                "Ingredient {} is not part of this recipe",
                ingredient_row_id
            ));
            return;
        }

        self.availability.begin(ingredient_row_id);
        match api.delete_recipe_ingredient(ingredient_row_id).await {
            Ok(()) => {
                tracing::info!(ingredient_row_id, "Removed ingredient");
                self.refresh_ingredients(api).await;
                self.availability.finish(ingredient_row_id, true);
            }
            Err(e) => {
                self.availability.finish(ingredient_row_id, false);
                surface(&mut self.error, "Failed to remove ingredient", &e);
            }
        }
    }

    fn ingredient(&self, ingredient_row_id: i64) -> Option<&RecipeIngredient> {
        self.ingredients
            .iter()
            .find(|ri| ri.id == Some(ingredient_row_id))
    }

    pub fn recipe_id(&self) -> i64 {
        self.recipe_id
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn ingredients(&self) -> &[RecipeIngredient] {
        &self.ingredients
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Ingredient rows resolved against the catalog; orphans are skipped
    pub fn rows(&self) -> Vec<IngredientRow<'_>> {
        join_ingredients(&self.ingredients, self.catalog.items())
    }

    pub fn availability_state(&self, ingredient_row_id: i64) -> RowState {
        self.availability.state(ingredient_row_id)
    }

    pub fn shopping_state(&self, item_id: i64) -> RowState {
        self.shopping.state(item_id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
