//! `MapMuse` - Let your feelings guide your food
//!
//! This library infers a mood from quiz answers, maps it to cuisine
//! preferences and recommends curated places and live restaurants.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod mood;
pub mod place_resolver;
pub mod render;
pub mod restaurants;
pub mod session;

// Re-export core types for public API
pub use app::{App, Recommendation, RestaurantLookup};
pub use catalog::{Mood, MoodCatalog};
pub use config::MapMuseConfig;
pub use error::MapMuseError;
pub use models::{Place, RestaurantRecord};
pub use mood::{MoodClassifier, QUESTIONS, Question};
pub use place_resolver::PlaceResolver;
pub use restaurants::{
    MatchOutcome, MatchPolicy, MatchReport, OverpassClient, RestaurantMatcher, RestaurantProvider,
};
pub use session::{QuizEvent, QuizState, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, MapMuseError>;
