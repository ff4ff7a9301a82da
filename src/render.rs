//! Plain-text rendering of quiz screens and recommendations

use std::fmt::Write;

use crate::catalog::Mood;
use crate::models::{Place, map_link};
use crate::mood::Question;
use crate::restaurants::{MatchOutcome, MatchReport, RankedRestaurant};

pub const NO_CURATED_PLACES: &str = "No curated places found for your mood in this city.";
pub const NO_RESTAURANTS: &str = "No restaurants found nearby. Try changing city or mood.";
const DEFAULT_SPOT: &str = "a vibe-friendly place";

#[must_use]
pub fn banner() -> String {
    "🧭 MapMuse\nLet your feelings guide your food\n".to_string()
}

/// Numbered list of selectable cities
#[must_use]
pub fn city_menu(cities: &[String]) -> String {
    let mut out = String::new();
    for (index, city) in cities.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, city);
    }
    out
}

/// A question with its numbered options
#[must_use]
pub fn question(index: usize, question: &Question) -> String {
    let mut out = format!("Q{}: {}\n", index + 1, question.prompt);
    for (number, option) in question.options.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", number + 1, option);
    }
    out
}

/// Personalised greeting with mood, craving and top curated spot
#[must_use]
pub fn mood_summary(name: &str, city: &str, mood: &Mood) -> String {
    let spot = mood
        .places_in(city)
        .first()
        .map_or(DEFAULT_SPOT, |place| place.name.as_str());

    format!(
        "👋 Hi {name}!\n\
         You're feeling {mood_name} {icon} and seem to be craving {craving}.\n\
         In {city}, here's a place that matches your mood: 🗺️ {spot}\n",
        mood_name = mood.name,
        icon = mood.icon,
        craving = mood.craving(2),
    )
}

/// Curated places with map links; the first one is the map centre
#[must_use]
pub fn curated_places(mood: &Mood, places: &[Place]) -> String {
    let Some(centre) = places.first() else {
        return format!("{NO_CURATED_PLACES}\n");
    };

    let mut out = format!(
        "📍 Vibe-Matched Spots (map centred on {}: {})\n",
        centre.format_coordinates(),
        centre.map_link()
    );
    for place in places {
        let _ = writeln!(out, "  - {} [{}] → {}", place.name, mood.name, place.map_link());
    }
    out
}

/// Ranked restaurant list, fallback list, or the empty-state message
#[must_use]
pub fn restaurants(report: &MatchReport, top_spot: Option<&Place>) -> String {
    match report.outcome() {
        MatchOutcome::Matches(list) => {
            let mut out = "🍛 Mood-Matched Restaurants\n".to_string();
            out.push_str(&restaurant_lines(list, top_spot));
            out
        }
        MatchOutcome::Fallback(list) => {
            let mut out = "No exact mood match. Here are popular alternatives:\n".to_string();
            out.push_str(&restaurant_lines(list, top_spot));
            out
        }
        MatchOutcome::Empty => format!("{NO_RESTAURANTS}\n"),
    }
}

fn restaurant_lines(list: &[RankedRestaurant], top_spot: Option<&Place>) -> String {
    let mut out = String::new();
    for ranked in list {
        let record = &ranked.record;
        let _ = write!(
            out,
            "  - {} ({}) — {}⭐ → {}",
            record.name,
            record.cuisine,
            ranked.rating,
            map_link(record.lat, record.lon)
        );
        if let Some(spot) = top_spot {
            let _ = write!(
                out,
                " ({:.1} km from {})",
                spot.distance_km(record.lat, record.lon),
                spot.name
            );
        }
        out.push('\n');
    }
    out
}
