//! Restaurant record model for live-fetched data

use serde::{Deserialize, Serialize};

/// A restaurant with a usable name and coordinate pair
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RestaurantRecord {
    pub name: String,
    /// Raw cuisine tag, possibly empty or a `;` separated list
    pub cuisine: String,
    pub lat: f64,
    pub lon: f64,
}

impl RestaurantRecord {
    #[must_use]
    pub fn new<N: Into<String>, C: Into<String>>(name: N, cuisine: C, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            cuisine: cuisine.into(),
            lat,
            lon,
        }
    }

    /// Records without a name or with non-finite coordinates are never shown.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.name.trim().is_empty() && self.lat.is_finite() && self.lon.is_finite()
    }

    /// Placeholder rating in `1..=5` derived from the name length.
    ///
    /// This carries no real-world meaning; it only gives a deterministic
    /// ordering until a real rating source is wired in.
    #[must_use]
    pub fn synthetic_rating(&self) -> usize {
        (self.name.chars().count() % 5) + 1
    }
}
