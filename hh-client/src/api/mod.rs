//! REST API access for the household backend

pub mod client;
pub mod error;

pub use client::HouseholdClient;
pub use error::ApiError;
