//! Restaurant module
//!
//! This module provides the live restaurant side of a recommendation:
//! - Fetching restaurants for a city from the Overpass API
//! - Partitioning them into mood matches and generic fallbacks

pub mod error;
pub mod matcher;
pub mod overpass;

use async_trait::async_trait;

use crate::models::RestaurantRecord;

pub use error::{RestaurantError, Result};
pub use matcher::{MatchOutcome, MatchPolicy, MatchReport, RankedRestaurant, RestaurantMatcher};
pub use overpass::OverpassClient;

/// Source of restaurant records for a city
#[async_trait]
pub trait RestaurantProvider: Send + Sync {
    /// Fetch usable restaurant records for a city.
    ///
    /// A non-success upstream status is an error; nothing is retried.
    async fn fetch_restaurants(&self, city: &str) -> Result<Vec<RestaurantRecord>>;
}
