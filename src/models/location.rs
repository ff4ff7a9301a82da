//! Place model for curated locations and map links

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

/// A hand-authored location from the mood catalog
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Place {
    /// Display name of the place
    pub name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl Place {
    /// Create a new place
    #[must_use]
    pub fn new<S: Into<String>>(name: S, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Format place as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }

    /// OpenStreetMap link centred on this place
    #[must_use]
    pub fn map_link(&self) -> String {
        map_link(self.lat, self.lon)
    }

    /// Great-circle distance in kilometres to the given coordinates
    #[must_use]
    pub fn distance_km(&self, lat: f64, lon: f64) -> f64 {
        distance(
            HaversineLocation {
                latitude: self.lat,
                longitude: self.lon,
            },
            HaversineLocation {
                latitude: lat,
                longitude: lon,
            },
            Units::Kilometers,
        )
    }
}

/// OpenStreetMap marker link for a coordinate pair
#[must_use]
pub fn map_link(lat: f64, lon: f64) -> String {
    format!("https://www.openstreetmap.org/?mlat={lat}&mlon={lon}")
}
