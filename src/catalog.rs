//! Mood catalog data types and loading
//!
//! The catalog is a JSON document keyed by mood name. Each entry carries a
//! display icon, cue words used by the classifier, cuisine tags used for
//! restaurant filtering and curated places per city. Document key order is
//! significant: it is the tie-break order of the classifier.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::Place;
use crate::{MapMuseError, Result};

/// A named mood and everything attached to it
#[derive(Debug, Clone, PartialEq)]
pub struct Mood {
    pub name: String,
    pub icon: String,
    pub cues: Vec<String>,
    pub cuisine_tags: Vec<String>,
    pub places: BTreeMap<String, Vec<Place>>,
}

/// One catalog entry as it appears in the source document
#[derive(Debug, Clone, Default, Deserialize)]
struct MoodEntry {
    #[serde(default)]
    icon: String,
    #[serde(default)]
    cues: Vec<String>,
    #[serde(default)]
    cuisine_tags: Vec<String>,
    #[serde(default)]
    places: BTreeMap<String, Vec<Place>>,
}

impl Mood {
    fn from_entry(name: String, entry: MoodEntry) -> Self {
        Self {
            name,
            icon: entry.icon,
            cues: entry.cues,
            cuisine_tags: entry.cuisine_tags,
            places: entry.places,
        }
    }

    /// Lowercase cues joined by a single space
    #[must_use]
    pub fn cue_text(&self) -> String {
        self.cues.join(" ").to_lowercase()
    }

    /// Curated places for a city in catalog order
    #[must_use]
    pub fn places_in(&self, city: &str) -> &[Place] {
        self.places
            .get(city)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The first `n` cuisine tags, comma separated
    #[must_use]
    pub fn craving(&self, n: usize) -> String {
        self.cuisine_tags
            .iter()
            .take(n)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Immutable, ordered collection of moods
#[derive(Debug, Clone)]
pub struct MoodCatalog {
    moods: Vec<Mood>,
}

impl MoodCatalog {
    /// Build a catalog, rejecting empty catalogs and duplicate names
    pub fn new(moods: Vec<Mood>) -> Result<Self> {
        if moods.is_empty() {
            return Err(MapMuseError::catalog("catalog defines no moods"));
        }

        let mut seen = HashSet::new();
        for mood in &moods {
            if !seen.insert(mood.name.as_str()) {
                return Err(MapMuseError::catalog(format!(
                    "duplicate mood '{}'",
                    mood.name
                )));
            }
        }

        Ok(Self { moods })
    }

    /// Load the catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading mood catalog from {}", path.display());

        let raw = fs::read_to_string(path).map_err(|e| {
            MapMuseError::catalog(format!("failed to read {}: {e}", path.display()))
        })?;

        let document: CatalogDocument = serde_json::from_str(&raw)
            .map_err(|e| MapMuseError::catalog(format!("{}: {e}", path.display())))?;
        let catalog = Self::new(document.0)?;

        debug!(
            "Loaded {} moods covering {} cities",
            catalog.moods.len(),
            catalog.cities().len()
        );
        Ok(catalog)
    }

    /// Parse the catalog from a JSON document
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(raw).map_err(|e| MapMuseError::catalog(e.to_string()))?;
        Self::new(document.0)
    }

    /// All moods in document order
    #[must_use]
    pub fn moods(&self) -> &[Mood] {
        &self.moods
    }

    /// Look up a mood by its exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Mood> {
        self.moods.iter().find(|mood| mood.name == name)
    }

    /// Every city that has curated places for any mood, sorted
    #[must_use]
    pub fn cities(&self) -> Vec<String> {
        self.moods
            .iter()
            .flat_map(|mood| mood.places.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn has_city(&self, city: &str) -> bool {
        self.moods.iter().any(|mood| mood.places.contains_key(city))
    }
}

/// Moods in source key order; duplicate keys are an error instead of a silent overwrite.
struct CatalogDocument(Vec<Mood>);

impl<'de> Deserialize<'de> for CatalogDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = CatalogDocument;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of mood names to mood entries")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut moods: Vec<Mood> = Vec::new();
                while let Some((name, entry)) = map.next_entry::<String, MoodEntry>()? {
                    if moods.iter().any(|mood| mood.name == name) {
                        return Err(de::Error::custom(format!("duplicate mood '{name}'")));
                    }
                    moods.push(Mood::from_entry(name, entry));
                }
                Ok(CatalogDocument(moods))
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
