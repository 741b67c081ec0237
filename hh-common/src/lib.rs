//! # Household Common Library
//!
//! Shared code for the household client crates:
//! - Wire models for recipes, ingredients, items and dishwashing events
//! - Configuration loading (API base URL, timeout, logging)
//! - Timestamp parsing and display helpers
//! - Common error type

pub mod config;
pub mod error;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use models::{DishwashingEvent, Item, Person, Recipe, RecipeIngredient};
