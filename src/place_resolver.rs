//! Place Resolution Module
//!
//! This module resolves a (mood, city) pair into the curated places bundled
//! with the mood catalog.

use crate::catalog::MoodCatalog;
use crate::models::Place;
use tracing::debug;

/// Looks up curated places in the catalog
pub struct PlaceResolver<'a> {
    catalog: &'a MoodCatalog,
}

impl<'a> PlaceResolver<'a> {
    #[must_use]
    pub fn new(catalog: &'a MoodCatalog) -> Self {
        Self { catalog }
    }

    /// Curated places for a mood in a city, in catalog order.
    ///
    /// An unknown mood or a city without entries yields an empty slice.
    #[must_use]
    pub fn resolve(&self, mood: &str, city: &str) -> &'a [Place] {
        let places = self
            .catalog
            .get(mood)
            .map(|m| m.places_in(city))
            .unwrap_or_default();

        debug!("Resolved {} curated places for {} in {}", places.len(), mood, city);
        places
    }

    /// The place surfaced as "top match" in summaries
    #[must_use]
    pub fn top_match(&self, mood: &str, city: &str) -> Option<&'a Place> {
        self.resolve(mood, city).first()
    }
}
