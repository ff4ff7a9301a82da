//! Mood module
//!
//! This module turns quiz answers into a mood:
//! - The fixed question bank shown to the user
//! - Substring scoring of answers against each mood's cues

pub mod classifier;
pub mod questions;

pub use classifier::{MoodClassifier, MoodScore};
pub use questions::{QUESTIONS, Question};
