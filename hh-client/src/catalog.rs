//! Item catalog accessor
//!
//! Holds the last fetched item list. Every refresh replaces the list
//! wholesale; updates go to the backend and are followed by a refresh, so
//! the cached list is never patched locally.

use hh_common::Item;

use crate::api::{ApiError, HouseholdClient};

#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
    loaded: bool,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with an already fetched list
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            items,
            loaded: true,
        }
    }

    pub async fn refresh(&mut self, api: &HouseholdClient) -> Result<(), ApiError> {
        let items = api.list_items().await?;
        tracing::debug!(count = items.len(), "Fetched item catalog");
        self.replace(items);
        Ok(())
    }

    pub fn replace(&mut self, items: Vec<Item>) {
        self.items = items;
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == Some(id))
    }

    /// Items currently flagged for buying, in catalog order
    pub fn on_shopping_list(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.is_on_shopping_list)
    }

    /// Items not flagged for buying, in catalog order
    pub fn not_on_shopping_list(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| !item.is_on_shopping_list)
    }

    /// Send the full item to the backend, then refetch the catalog
    pub async fn update(&mut self, api: &HouseholdClient, item: &Item) -> Result<(), ApiError> {
        let id = item.id.ok_or(ApiError::MissingId("item"))?;
        api.update_item(id, item).await?;
        tracing::info!(item_id = id, name = %item.name, on_list = item.is_on_shopping_list, "Updated item");
        self.refresh(api).await
    }
}
