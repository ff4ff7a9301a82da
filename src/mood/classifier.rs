//! Mood classification
//!
//! Each answer is lowercased and looked up as a substring of a mood's cues
//! (lowercased, joined by a single space). Every hit adds one point to that
//! mood. The highest total wins; ties go to the mood that comes first in the
//! catalog, so an empty answer list yields the first mood.

use tracing::{debug, instrument};

use crate::catalog::{Mood, MoodCatalog};
use crate::{MapMuseError, Result};

/// Cumulative score of a single mood
#[derive(Debug, Clone, PartialEq)]
pub struct MoodScore<'a> {
    pub mood: &'a Mood,
    pub score: u32,
}

/// Scores quiz answers against a catalog
pub struct MoodClassifier<'a> {
    catalog: &'a MoodCatalog,
    cue_texts: Vec<String>,
}

impl<'a> MoodClassifier<'a> {
    #[must_use]
    pub fn new(catalog: &'a MoodCatalog) -> Self {
        let cue_texts = catalog.moods().iter().map(Mood::cue_text).collect();
        Self { catalog, cue_texts }
    }

    #[must_use]
    pub fn catalog(&self) -> &'a MoodCatalog {
        self.catalog
    }

    /// Per-mood scores in catalog order
    #[must_use]
    pub fn scores<S: AsRef<str>>(&self, answers: &[S]) -> Vec<MoodScore<'a>> {
        let answers: Vec<String> = answers
            .iter()
            .map(|answer| answer.as_ref().to_lowercase())
            .collect();

        self.catalog
            .moods()
            .iter()
            .zip(&self.cue_texts)
            .map(|(mood, cue_text)| {
                let hits = answers
                    .iter()
                    .filter(|answer| cue_text.contains(answer.as_str()))
                    .count();
                MoodScore {
                    mood,
                    score: u32::try_from(hits).unwrap_or(u32::MAX),
                }
            })
            .collect()
    }

    /// The highest-scoring mood, first in catalog order on ties
    #[instrument(skip(self, answers), fields(answers = answers.len()))]
    pub fn classify<S: AsRef<str>>(&self, answers: &[S]) -> Result<&'a Mood> {
        let mut best: Option<MoodScore<'a>> = None;
        for candidate in self.scores(answers) {
            if best.as_ref().is_none_or(|top| candidate.score > top.score) {
                best = Some(candidate);
            }
        }

        let best = best.ok_or_else(|| MapMuseError::catalog("catalog defines no moods"))?;
        debug!("Classified mood {} with score {}", best.mood.name, best.score);
        Ok(best.mood)
    }
}
