//! Plain-text rendering of view state for the terminal

use hh_common::time::format_event_time;
use std::fmt::Write;

use crate::tracker::RowState;
use crate::views::{DishwashingView, RecipeDetailView, RecipeEditor, RecipeListView, ShoppingListView};

fn marker(state: RowState, checked: bool) -> &'static str {
    match state {
        RowState::Pending => "[…]",
        RowState::Error => "[!]",
        RowState::Idle if checked => "[x]",
        RowState::Idle => "[ ]",
    }
}

pub fn recipe_list(view: &RecipeListView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Recipes");
    if view.recipes().is_empty() {
        let _ = writeln!(out, "  No recipes yet. Add one with `household recipes add`.");
        return out;
    }
    for recipe in view.recipes() {
        let id = recipe.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "  #{:<4} {}", id, recipe.name);
        if let Some(first_line) = recipe.description.lines().find(|l| !l.trim().is_empty()) {
            let _ = writeln!(out, "        {}", first_line.trim());
        }
    }
    out
}

pub fn recipe_detail(view: &RecipeDetailView) -> String {
    let mut out = String::new();
    let Some(recipe) = view.recipe() else {
        let _ = writeln!(out, "Recipe not found");
        return out;
    };

    let _ = writeln!(out, "{}", recipe.name);
    if !recipe.description.trim().is_empty() {
        let _ = writeln!(out, "\nDescription");
        for line in recipe.description.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }

    let _ = writeln!(out, "\nIngredients");
    let rows = view.rows();
    if view.ingredients().is_empty() {
        let _ = writeln!(out, "  No ingredients yet");
        return out;
    }

    for row in rows {
        let row_id = row.ingredient.id.unwrap_or_default();
        let item_id = row.item.id.unwrap_or_default();
        let available = marker(view.availability_state(row_id), row.ingredient.is_available);

        let mut line = format!("  {} #{:<4} {}", available, row_id, row.item.name);
        if !row.ingredient.weight.is_empty() {
            let _ = write!(line, " ({})", row.ingredient.weight);
        }

        let shopping = match view.shopping_state(item_id) {
            RowState::Pending => "adding to list…".to_string(),
            _ if row.can_add_to_shopping_list() => format!("add to list: item {}", item_id),
            _ => "on shopping list".to_string(),
        };
        let _ = writeln!(out, "{:<40} {}", line, shopping);
    }
    out
}

pub fn shopping_list(view: &ShoppingListView) -> String {
    let mut out = String::new();
    let to_buy = view.to_buy();
    let available = view.available();

    let _ = writeln!(out, "Shopping list: {} item(s)", to_buy.len());

    let _ = writeln!(out, "\nTo buy ({})", to_buy.len());
    if to_buy.is_empty() {
        let _ = writeln!(out, "  Nothing on your shopping list");
    }
    for item in to_buy {
        let id = item.id.unwrap_or_default();
        let _ = writeln!(out, "  {} #{:<4} {}", marker(view.row_state(id), false), id, item.name);
    }

    let _ = writeln!(out, "\nAvailable ({})", available.len());
    if available.is_empty() {
        let _ = writeln!(out, "  Everything needs buying");
    }
    for item in available {
        let id = item.id.unwrap_or_default();
        let _ = writeln!(out, "  {} #{:<4} {}", marker(view.row_state(id), true), id, item.name);
    }
    out
}

pub fn dishwashing(view: &DishwashingView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dishwashing");
    let _ = writeln!(out, "  Next up: {}", view.whose_turn().unwrap_or("Loading..."));

    let _ = writeln!(out, "\nRecent events");
    if view.total() == 0 {
        let _ = writeln!(out, "  No dishwashing events recorded yet");
        return out;
    }
    for event in view.recent() {
        let _ = writeln!(
            out,
            "  {:<8} {}",
            event.name.as_deref().unwrap_or("Unknown"),
            format_event_time(&event.time)
        );
    }
    if view.is_truncated() {
        let _ = writeln!(out, "  Showing the 10 most recent of {} events", view.total());
    }

    if let Some(shares) = view.shares() {
        let _ = writeln!(out, "\nStatistics");
        for share in shares {
            let _ = writeln!(
                out,
                "  {:<8} {:>3}  {:.1}% of total",
                share.person, share.count, share.percentage
            );
        }
    }
    out
}

pub fn saved_recipe(editor: &RecipeEditor, recipe_id: Option<i64>) -> String {
    let id = recipe_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    let saved_lines = editor.draft().savable_lines().count();
    format!(
        "Saved recipe #{} \"{}\" ({} ingredient(s))\n",
        id,
        editor.draft().name.trim(),
        saved_lines
    )
}
