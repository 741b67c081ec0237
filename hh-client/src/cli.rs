//! Command-line interface definition

use clap::{Args, Parser, Subcommand};
use hh_common::Person;
use std::path::PathBuf;

use crate::views::DraftLine;

#[derive(Debug, Parser)]
#[command(name = "household", version, about = "Recipes, shopping list and dishwashing turns")]
pub struct Cli {
    /// Backend base URL (overrides HOUSEHOLD_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recipes and their ingredients
    #[command(subcommand)]
    Recipes(RecipeCommand),

    /// Shopping list (the item catalog)
    #[command(subcommand)]
    Items(ItemCommand),

    /// Dishwashing log and whose turn it is
    #[command(subcommand)]
    Dishes(DishCommand),
}

#[derive(Debug, Subcommand)]
pub enum RecipeCommand {
    List,
    Show {
        id: i64,
    },
    Add(RecipeAddArgs),
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: i64,
    },
    /// Flip an ingredient row's availability
    ToggleAvailable {
        recipe_id: i64,
        ingredient_row_id: i64,
    },
    /// Put a recipe's ingredient item on the shopping list
    Shop {
        recipe_id: i64,
        item_id: i64,
    },
    AddIngredient {
        recipe_id: i64,
        item_id: i64,
        weight: String,
        #[arg(long)]
        available: bool,
    },
    RemoveIngredient {
        recipe_id: i64,
        ingredient_row_id: i64,
    },
}

#[derive(Debug, Args)]
pub struct RecipeAddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// ITEM_ID:WEIGHT[:available], repeatable
    #[arg(long = "ingredient", value_parser = parse_ingredient_spec)]
    pub ingredients: Vec<IngredientSpec>,
}

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    List,
    /// Flip the shopping-list flag of one or more items
    Toggle {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Create an item that starts on the shopping list
    Add {
        name: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum DishCommand {
    Show,
    /// Record that someone washed up
    Record {
        person: Person,
    },
}

/// Ingredient line given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientSpec {
    pub item_id: i64,
    pub weight: String,
    pub is_available: bool,
}

impl IngredientSpec {
    /// Draft line with the item name left for the editor to resolve
    pub fn to_draft_line(&self) -> DraftLine {
        DraftLine {
            ingredient_id: self.item_id,
            ingredient_name: String::new(),
            weight: self.weight.clone(),
            is_available: self.is_available,
        }
    }
}

pub fn parse_ingredient_spec(raw: &str) -> Result<IngredientSpec, String> {
    let mut parts = raw.splitn(3, ':');
    let item_id = parts
        .next()
        .unwrap_or_default()
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid item id in '{}'", raw))?;
    let weight = parts.next().unwrap_or_default().trim().to_string();
    let is_available = match parts.next().map(str::trim) {
        None | Some("") => false,
        Some("available") => true,
        Some(other) => return Err(format!("unknown flag '{}', expected 'available'", other)),
    };

    Ok(IngredientSpec {
        item_id,
        weight,
        is_available,
    })
}
