//! Shopping list view
//!
//! The shopping list is the item catalog split by `is_on_shopping_list`.
//! Toggles are tracked per item id; a batch of toggles runs concurrently and
//! is followed by a single catalog refetch.

use futures::future::join_all;
use hh_common::Item;

use super::surface;
use crate::api::HouseholdClient;
use crate::catalog::ItemCatalog;
use crate::tracker::{InFlight, RowState};

#[derive(Debug, Default)]
pub struct ShoppingListView {
    catalog: ItemCatalog,
    tracker: InFlight<i64>,
    error: Option<String>,
}

impl ShoppingListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh(&mut self, api: &HouseholdClient) {
        match self.catalog.refresh(api).await {
            Ok(()) => self.error = None,
            Err(e) => surface(&mut self.error, "Failed to fetch items", &e),
        }
    }

    /// Flip one item's shopping-list flag
    pub async fn toggle(&mut self, api: &HouseholdClient, item_id: i64) {
        self.toggle_many(api, &[item_id]).await;
    }

    /// Flip several items' flags concurrently, then refetch once
    ///
    /// Unknown ids are reported and skipped. Each update succeeds or fails on
    /// its own; there is no rollback of the ones that landed.
    pub async fn toggle_many(&mut self, api: &HouseholdClient, item_ids: &[i64]) {
        let mut bodies: Vec<(i64, Item)> = Vec::with_capacity(item_ids.len());
        for &id in item_ids {
            match self.catalog.get(id) {
                Some(item) => bodies.push((id, item.with_shopping_flag(!item.is_on_shopping_list))),
                None => {
                    tracing::error!(item_id = id, "Item not found in catalog");
                    self.error = Some(format!("Item {} not found", id));
                }
            }
        }
        if bodies.is_empty() {
            return;
        }

        for (id, _) in &bodies {
            self.tracker.begin(*id);
        }

        let results = join_all(bodies.iter().map(|(id, body)| api.update_item(*id, body))).await;

        let mut any_succeeded = false;
        for ((id, body), result) in bodies.iter().zip(results) {
            match result {
                Ok(()) => {
                    tracing::info!(item_id = id, on_list = body.is_on_shopping_list, "Updated item");
                    any_succeeded = true;
                    self.tracker.finish(*id, true);
                }
                Err(e) => {
                    self.tracker.finish(*id, false);
                    surface(&mut self.error, "Failed to update item", &e);
                }
            }
        }

        if any_succeeded {
            if let Err(e) = self.catalog.refresh(api).await {
                surface(&mut self.error, "Failed to fetch items", &e);
            }
        }
    }

    /// Create a catalog item that starts on the shopping list
    ///
    /// Blank names are ignored.
    pub async fn create_item(&mut self, api: &HouseholdClient, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("Ignoring blank item name");
            return;
        }

        match api.create_item(&Item::new(name, true)).await {
            Ok(created) => {
                tracing::info!(item_id = ?created.id, name = %created.name, "Created item");
                self.refresh(api).await;
            }
            Err(e) => surface(&mut self.error, "Failed to create new item", &e),
        }
    }

    pub async fn delete_item(&mut self, api: &HouseholdClient, item_id: i64) {
        self.tracker.begin(item_id);
        match api.delete_item(item_id).await {
            Ok(()) => {
                tracing::info!(item_id, "Deleted item");
                self.tracker.finish(item_id, true);
                self.refresh(api).await;
            }
            Err(e) => {
                self.tracker.finish(item_id, false);
                surface(&mut self.error, "Failed to delete item", &e);
            }
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Items flagged for buying
    pub fn to_buy(&self) -> Vec<&Item> {
        self.catalog.on_shopping_list().collect()
    }

    /// Items already at home
    pub fn available(&self) -> Vec<&Item> {
        self.catalog.not_on_shopping_list().collect()
    }

    pub fn row_state(&self, item_id: i64) -> RowState {
        self.tracker.state(item_id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
