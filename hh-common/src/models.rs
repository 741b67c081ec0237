//! Wire models exchanged with the household REST backend
//!
//! Field names follow the backend's camelCase JSON. Every `id` is optional
//! because the backend assigns it on create.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Shared catalog entry, usable by recipes and the shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    /// Shopping-list membership is a flag on the item, not a separate list
    #[serde(default)]
    pub is_on_shopping_list: bool,
}

impl Item {
    /// New item that is not yet known to the backend
    pub fn new(name: impl Into<String>, is_on_shopping_list: bool) -> Self {
        Self {
            id: None,
            name: name.into(),
            is_on_shopping_list,
        }
    }

    /// Copy of this item with the shopping-list flag replaced
    pub fn with_shopping_flag(&self, is_on_shopping_list: bool) -> Self {
        Self {
            is_on_shopping_list,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Recipe {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Join row linking a recipe to a catalog item
///
/// `is_available` is scoped to this recipe usage and is independent of the
/// item's own shopping-list flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub recipe_id: i64,
    /// Foreign key into the item catalog
    pub ingredient_id: i64,
    /// Free-text quantity ("200g", "2 tbsp")
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub is_available: bool,
}

impl RecipeIngredient {
    /// Copy of this row with the availability flag replaced
    pub fn with_availability(&self, is_available: bool) -> Self {
        Self {
            is_available,
            ..self.clone()
        }
    }
}

/// One entry of the append-only dishwashing log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishwashingEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// ISO-8601 timestamp as sent by the backend
    pub time: String,
    /// Person who washed up; the backend may send null
    #[serde(default)]
    pub name: Option<String>,
}

/// People the backend knows how to record dishwashing for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Person {
    Marci,
    Reka,
}

impl Person {
    pub const ALL: [Person; 2] = [Person::Marci, Person::Reka];

    /// Display name, as stored in event `name` fields
    pub fn name(self) -> &'static str {
        match self {
            Person::Marci => "Marci",
            Person::Reka => "Reka",
        }
    }

    /// URL path segment used by `POST /api/dishwashing/{person}`
    pub fn slug(self) -> &'static str {
        match self {
            Person::Marci => "marci",
            Person::Reka => "reka",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Person {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Person::ALL
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "unknown person '{}', expected one of: marci, reka",
                    s
                ))
            })
    }
}
