//! Recipe add/edit form state
//!
//! Create mode posts the recipe and then each ingredient line one at a time.
//! A failure part-way stops the loop; lines already created stay created.
//! Edit mode only updates the recipe's name and description.

use hh_common::{Recipe, RecipeIngredient};
use thiserror::Error;

use super::surface;
use crate::api::{ApiError, HouseholdClient};
use crate::catalog::ItemCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(i64),
}

/// One ingredient line of the form
///
/// `ingredient_id` 0 means no catalog item was chosen; such lines are not saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftLine {
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub weight: String,
    pub is_available: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub description: String,
    pub lines: Vec<DraftLine>,
}

/// Required-field violations; line numbers are 1-based
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Recipe name is required")]
    MissingName,

    #[error("Ingredient {0}: name is required")]
    MissingIngredientName(usize),

    #[error("Ingredient {0}: quantity is required")]
    MissingWeight(usize),
}

impl RecipeDraft {
    /// Draft prefilled from a stored recipe
    ///
    /// Line names come from the catalog; an orphaned row gets a blank name.
    pub fn from_existing(recipe: &Recipe, ingredients: &[RecipeIngredient], catalog: &ItemCatalog) -> Self {
        let lines = ingredients
            .iter()
            .map(|ri| DraftLine {
                ingredient_id: ri.ingredient_id,
                ingredient_name: catalog
                    .get(ri.ingredient_id)
                    .map(|item| item.name.clone())
                    .unwrap_or_default(),
                weight: ri.weight.clone(),
                is_available: ri.is_available,
            })
            .collect();

        Self {
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            lines,
        }
    }

    pub fn validate(&self) -> Result<(), Vec<DraftError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(DraftError::MissingName);
        }
        for (index, line) in self.lines.iter().enumerate() {
            if line.ingredient_name.trim().is_empty() {
                errors.push(DraftError::MissingIngredientName(index + 1));
            }
            if line.weight.trim().is_empty() {
                errors.push(DraftError::MissingWeight(index + 1));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Recipe body without id (name and description only)
    pub fn recipe_body(&self) -> Recipe {
        Recipe::new(self.name.trim(), self.description.clone())
    }

    /// Lines that reference a catalog item and will be saved
    pub fn savable_lines(&self) -> impl Iterator<Item = &DraftLine> {
        self.lines.iter().filter(|line| line.ingredient_id > 0)
    }
}

#[derive(Debug)]
pub struct RecipeEditor {
    mode: EditorMode,
    draft: RecipeDraft,
    catalog: ItemCatalog,
    validation: Vec<DraftError>,
    error: Option<String>,
}

impl RecipeEditor {
    /// Editor state with an explicit draft and catalog
    pub fn with_draft(mode: EditorMode, draft: RecipeDraft, catalog: ItemCatalog) -> Self {
        Self {
            mode,
            draft,
            catalog,
            validation: Vec::new(),
            error: None,
        }
    }

    /// Empty form; loads the catalog for item selection
    pub async fn for_create(api: &HouseholdClient) -> Self {
        let mut editor = Self::with_draft(EditorMode::Create, RecipeDraft::default(), ItemCatalog::new());
        if let Err(e) = editor.catalog.refresh(api).await {
            surface(&mut editor.error, "Failed to fetch items", &e);
        }
        editor
    }

    /// Form prefilled from a stored recipe and its ingredient rows
    pub async fn for_edit(api: &HouseholdClient, recipe_id: i64) -> Self {
        let mut editor = Self::with_draft(EditorMode::Edit(recipe_id), RecipeDraft::default(), ItemCatalog::new());

        let (recipe, ingredients, items) = tokio::join!(
            api.get_recipe(recipe_id),
            api.list_recipe_ingredients(recipe_id),
            api.list_items(),
        );

        match items {
            Ok(items) => editor.catalog.replace(items),
            Err(e) => surface(&mut editor.error, "Failed to fetch items", &e),
        }
        let ingredients = match ingredients {
            Ok(ingredients) => ingredients,
            Err(e) => {
                surface(&mut editor.error, "Failed to fetch recipe ingredients", &e);
                Vec::new()
            }
        };
        match recipe {
            Ok(recipe) => {
                editor.draft = RecipeDraft::from_existing(&recipe, &ingredients, &editor.catalog);
            }
            Err(e) => surface(&mut editor.error, "Failed to fetch recipe", &e),
        }

        editor
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn draft(&self) -> &RecipeDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut RecipeDraft {
        &mut self.draft
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Append a blank line, returning its index
    pub fn add_line(&mut self) -> usize {
        self.draft.lines.push(DraftLine::default());
        self.draft.lines.len() - 1
    }

    pub fn remove_line(&mut self, index: usize) {
        if index < self.draft.lines.len() {
            self.draft.lines.remove(index);
        }
    }

    /// Point a line at a catalog item, copying its name
    ///
    /// Returns false when the line or the item does not exist.
    pub fn select_item(&mut self, index: usize, item_id: i64) -> bool {
        let Some(item) = self.catalog.get(item_id) else {
            return false;
        };
        let Some(line) = self.draft.lines.get_mut(index) else {
            return false;
        };
        line.ingredient_id = item_id;
        line.ingredient_name = item.name.clone();
        true
    }

    /// Validate and persist the draft
    ///
    /// Returns the saved recipe, or `None` with the error string set.
    pub async fn save(&mut self, api: &HouseholdClient) -> Option<Recipe> {
        if let Err(errors) = self.draft.validate() {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            tracing::warn!(%message, "Recipe draft failed validation");
            self.validation = errors;
            self.error = Some(message);
            return None;
        }
        self.validation.clear();
        self.error = None;

        match self.persist(api).await {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                let message = match self.mode {
                    EditorMode::Create => "Failed to create recipe",
                    EditorMode::Edit(_) => "Failed to update recipe",
                };
                surface(&mut self.error, message, &e);
                None
            }
        }
    }

    async fn persist(&self, api: &HouseholdClient) -> Result<Recipe, ApiError> {
        let body = self.draft.recipe_body();

        let saved = match self.mode {
            EditorMode::Edit(id) => {
                let recipe = Recipe { id: Some(id), ..body };
                api.update_recipe(id, &recipe).await?;
                tracing::info!(recipe_id = id, "Updated recipe");
                return Ok(recipe);
            }
            EditorMode::Create => api.create_recipe(&body).await?,
        };

        let Some(recipe_id) = saved.id else {
            tracing::warn!(name = %saved.name, "Created recipe has no id, ingredients not saved");
            return Ok(saved);
        };
        tracing::info!(recipe_id, name = %saved.name, "Created recipe");

        for line in self.draft.savable_lines() {
            let row = RecipeIngredient {
                id: None,
                recipe_id,
                ingredient_id: line.ingredient_id,
                weight: line.weight.clone(),
                is_available: line.is_available,
            };
            api.create_recipe_ingredient(&row).await?;
            tracing::debug!(recipe_id, item_id = line.ingredient_id, "Created recipe ingredient");
        }

        Ok(saved)
    }

    pub fn validation_errors(&self) -> &[DraftError] {
        &self.validation
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
