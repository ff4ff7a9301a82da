//! Restaurant matching against a mood's cuisine tags
//!
//! Records whose cuisine or name contains one of the mood's cuisine tags are
//! matches. Of the rest, records whose cuisine contains a generic fallback
//! keyword form the fallback list. Matches are ranked by the synthetic rating
//! (stable, so equal ratings keep fetch order); fallbacks keep fetch order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::RestaurantRecord;

pub const DEFAULT_MAX_MATCHES: usize = 10;
pub const DEFAULT_MAX_FALLBACK: usize = 5;
pub const DEFAULT_FALLBACK_KEYWORDS: [&str; 4] = ["biryani", "chettinad", "veg", "south_indian"];

/// Limits and keywords applied when partitioning restaurants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub max_matches: usize,
    pub max_fallback: usize,
    pub fallback_keywords: Vec<String>,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            max_matches: DEFAULT_MAX_MATCHES,
            max_fallback: DEFAULT_MAX_FALLBACK,
            fallback_keywords: DEFAULT_FALLBACK_KEYWORDS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// A restaurant together with its synthetic rating
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRestaurant {
    pub record: RestaurantRecord,
    pub rating: usize,
}

impl From<RestaurantRecord> for RankedRestaurant {
    fn from(record: RestaurantRecord) -> Self {
        let rating = record.synthetic_rating();
        Self { record, rating }
    }
}

/// Disjoint match and fallback lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchReport {
    pub matches: Vec<RankedRestaurant>,
    pub fallback: Vec<RankedRestaurant>,
}

/// What the user should be shown
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome<'a> {
    Matches(&'a [RankedRestaurant]),
    Fallback(&'a [RankedRestaurant]),
    Empty,
}

impl MatchReport {
    #[must_use]
    pub fn outcome(&self) -> MatchOutcome<'_> {
        if !self.matches.is_empty() {
            MatchOutcome::Matches(&self.matches)
        } else if !self.fallback.is_empty() {
            MatchOutcome::Fallback(&self.fallback)
        } else {
            MatchOutcome::Empty
        }
    }
}

/// Partitions restaurant records by cuisine overlap
pub struct RestaurantMatcher {
    policy: MatchPolicy,
    fallback_keywords: Vec<String>,
}

impl Default for RestaurantMatcher {
    fn default() -> Self {
        Self::new(MatchPolicy::default())
    }
}

impl RestaurantMatcher {
    #[must_use]
    pub fn new(policy: MatchPolicy) -> Self {
        let fallback_keywords = normalise(&policy.fallback_keywords);
        Self {
            policy,
            fallback_keywords,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Split records into ranked matches and fallbacks
    #[must_use]
    pub fn partition(&self, cuisine_tags: &[String], records: Vec<RestaurantRecord>) -> MatchReport {
        let tags = normalise(cuisine_tags);
        let mut report = MatchReport::default();

        for record in records.into_iter().filter(RestaurantRecord::is_usable) {
            let cuisine = record.cuisine.to_lowercase();
            let name = record.name.to_lowercase();

            if contains_any(&cuisine, &tags) || contains_any(&name, &tags) {
                report.matches.push(record.into());
            } else if contains_any(&cuisine, &self.fallback_keywords) {
                report.fallback.push(record.into());
            }
        }

        report.matches.sort_by(|a, b| b.rating.cmp(&a.rating));
        report.matches.truncate(self.policy.max_matches);
        report.fallback.truncate(self.policy.max_fallback);

        debug!(
            "Matched {} restaurants, {} fallbacks",
            report.matches.len(),
            report.fallback.len()
        );
        report
    }
}

/// Lowercase and drop blank keywords; a blank keyword would match everything.
fn normalise(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}
