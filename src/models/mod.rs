//! Data models for the MapMuse application
//!
//! This module contains the core domain models organized by concern:
//! - Place: Curated locations bundled with the mood catalog
//! - Restaurant: Restaurant records fetched from the live data provider

pub mod location;
pub mod restaurant;

// Re-export all public types for convenient access
pub use location::{Place, map_link};
pub use restaurant::RestaurantRecord;
