//! Per-view state objects
//!
//! Each view owns the lists it displays, its in-flight trackers and a single
//! error string. Failures of any call made by the view overwrite that string
//! and are logged; nothing is retried or rolled back.

pub mod dishwashing;
pub mod editor;
pub mod recipes;
pub mod shopping;

pub use dishwashing::DishwashingView;
pub use editor::{DraftError, DraftLine, EditorMode, RecipeDraft, RecipeEditor};
pub use recipes::{RecipeDetailView, RecipeListView};
pub use shopping::ShoppingListView;

use std::fmt::Display;

/// Replace the view's error string and log the underlying failure
pub(crate) fn surface(slot: &mut Option<String>, message: impl Into<String>, err: &dyn Display) {
    let message = message.into();
    tracing::error!(error = %err, "{}", message);
    *slot = Some(message);
}
