//! Recipe ingredient / item catalog join
//!
//! Ingredient rows reference catalog items by id. The join resolves each row
//! against the catalog and skips rows whose item is missing, so a stale or
//! partially loaded catalog never fails the whole recipe view.

use hh_common::{Item, RecipeIngredient};
use std::collections::HashMap;

/// One resolved ingredient line of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientRow<'a> {
    pub ingredient: &'a RecipeIngredient,
    pub item: &'a Item,
}

impl IngredientRow<'_> {
    /// The "add to shopping list" action is offered only for unflagged items
    pub fn can_add_to_shopping_list(&self) -> bool {
        !self.item.is_on_shopping_list
    }
}

/// Join ingredient rows with the item catalog, in ingredient order
///
/// Rows whose `ingredient_id` has no catalog entry are logged and skipped.
pub fn join_ingredients<'a>(
    ingredients: &'a [RecipeIngredient],
    items: &'a [Item],
) -> Vec<IngredientRow<'a>> {
    let by_id: HashMap<i64, &Item> = items
        .iter()
        .filter_map(|item| item.id.map(|id| (id, item)))
        .collect();

    ingredients
        .iter()
        .filter_map(|ingredient| match by_id.get(&ingredient.ingredient_id) {
            Some(item) => Some(IngredientRow { ingredient, item }),
            None => {
                tracing::warn!(
                    ingredient_id = ingredient.ingredient_id,
                    recipe_id = ingredient.recipe_id,
                    "Item not found for ingredient, skipping"
                );
                None
            }
        })
        .collect()
}

/// Request body for flipping a row's availability
///
/// Only `is_available` changes; the referenced item is untouched.
pub fn availability_toggled(ingredient: &RecipeIngredient) -> RecipeIngredient {
    ingredient.with_availability(!ingredient.is_available)
}

/// Request body for putting an item on the shopping list
///
/// Only the item changes; no ingredient row is touched.
pub fn added_to_shopping_list(item: &Item) -> Item {
    item.with_shopping_flag(true)
}
