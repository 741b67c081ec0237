//! Household client library
//!
//! Client-side state for the household backend: typed REST access, the item
//! catalog, the recipe ingredient join, dishwashing turn display and per-row
//! in-flight tracking. Each screen of the client is a view state object in
//! [`views`]; [`render`] turns those into terminal text.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod reconcile;
pub mod render;
pub mod tracker;
pub mod turn;
pub mod views;

pub use api::{ApiError, HouseholdClient};
pub use catalog::ItemCatalog;
pub use tracker::{InFlight, RowState};
