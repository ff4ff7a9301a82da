//! Quiz session state machine
//!
//! A session owns the user's identity, the answers collected so far and the
//! classified mood. The front end renders [`QuizState`] and feeds
//! [`QuizEvent`]s into [`Session::apply`]; nothing else mutates the session.

use tracing::{debug, info};

use crate::mood::{MoodClassifier, QUESTIONS, Question};
use crate::{MapMuseError, Result};

/// Where the user currently is in the quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    CollectingIdentity,
    /// Waiting for the answer to the question at this index
    AskingQuestion(usize),
    /// All questions answered; holds the mood name
    Classified(String),
}

/// Input from the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    Identify { name: String, city: String },
    Answer(String),
}

/// Who is taking the quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub city: String,
}

/// State of one user's quiz
#[derive(Debug, Clone)]
pub struct Session {
    questions: &'static [Question],
    identity: Option<Identity>,
    answers: Vec<String>,
    state: QuizState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session over the standard question bank
    #[must_use]
    pub fn new() -> Self {
        Self::with_questions(&QUESTIONS)
    }

    #[must_use]
    pub fn with_questions(questions: &'static [Question]) -> Self {
        Self {
            questions,
            identity: None,
            answers: Vec::new(),
            state: QuizState::CollectingIdentity,
        }
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    /// The question awaiting an answer, if any
    #[must_use]
    pub fn current_question(&self) -> Option<&'static Question> {
        match self.state {
            QuizState::AskingQuestion(index) => self.questions.get(index),
            _ => None,
        }
    }

    /// The classified mood name, if the quiz is complete
    #[must_use]
    pub fn mood(&self) -> Option<&str> {
        match &self.state {
            QuizState::Classified(mood) => Some(mood.as_str()),
            _ => None,
        }
    }

    /// Clear answers and mood, restarting at the first question.
    ///
    /// The identity is kept; without one the session goes back to collecting it.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.state = if self.identity.is_some() {
            QuizState::AskingQuestion(0)
        } else {
            QuizState::CollectingIdentity
        };
    }

    /// Feed an event into the session and return the new state.
    ///
    /// Invalid events leave the session untouched.
    pub fn apply(&mut self, event: QuizEvent, classifier: &MoodClassifier<'_>) -> Result<&QuizState> {
        match event {
            QuizEvent::Identify { name, city } => self.identify(name, city, classifier)?,
            QuizEvent::Answer(answer) => self.answer(&answer, classifier)?,
        }
        Ok(&self.state)
    }

    fn identify(&mut self, name: String, city: String, classifier: &MoodClassifier<'_>) -> Result<()> {
        let name = name.trim().to_string();
        let city = city.trim().to_string();
        if name.is_empty() {
            return Err(MapMuseError::validation("Name cannot be empty"));
        }
        if !classifier.catalog().has_city(&city) {
            return Err(MapMuseError::validation(format!("Unknown city '{city}'")));
        }

        let identity = Identity { name, city };
        if self.identity.as_ref() == Some(&identity) {
            debug!("Identity unchanged, keeping quiz progress");
            return Ok(());
        }

        info!("Starting quiz for {} in {}", identity.name, identity.city);
        self.identity = Some(identity);
        self.reset();
        self.advance(classifier)
    }

    fn answer(&mut self, input: &str, classifier: &MoodClassifier<'_>) -> Result<()> {
        let question = self
            .current_question()
            .ok_or_else(|| MapMuseError::validation("No question is waiting for an answer"))?;

        let option = question.resolve(input).ok_or_else(|| {
            MapMuseError::validation(format!(
                "'{}' is not one of: {}",
                input.trim(),
                question.options.join(", ")
            ))
        })?;

        self.answers.push(option.to_string());
        self.advance(classifier)
    }

    /// Move to the next unanswered question, or classify once all are answered
    fn advance(&mut self, classifier: &MoodClassifier<'_>) -> Result<()> {
        self.state = if self.answers.len() < self.questions.len() {
            QuizState::AskingQuestion(self.answers.len())
        } else {
            let mood = classifier.classify(self.answers.as_slice())?;
            QuizState::Classified(mood.name.clone())
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MoodCatalog;
    use rstest::{fixture, rstest};

    static TWO_QUESTIONS: [Question; 2] = [
        Question {
            prompt: "Energy?",
            options: ["Tense", "Energized", "Relaxed", "Sluggish"],
        },
        Question {
            prompt: "Crave?",
            options: ["Comfort", "Excitement", "Belonging", "Sweetness"],
        },
    ];

    #[fixture]
    fn catalog() -> MoodCatalog {
        MoodCatalog::from_json_str(
            r#"{
                "Stressed": {"cues": ["Tense", "Comfort"], "places": {"Pune": []}},
                "Calm": {"cues": ["relaxed", "content"], "places": {"Pune": [], "Goa": []}}
            }"#,
        )
        .unwrap()
    }

    fn identify(name: &str, city: &str) -> QuizEvent {
        QuizEvent::Identify {
            name: name.to_string(),
            city: city.to_string(),
        }
    }

    fn answer(text: &str) -> QuizEvent {
        QuizEvent::Answer(text.to_string())
    }

    #[rstest]
    fn test_full_quiz(catalog: MoodCatalog) {
        let classifier = MoodClassifier::new(&catalog);
        let mut session = Session::with_questions(&TWO_QUESTIONS);
        assert_eq!(session.state(), &QuizState::CollectingIdentity);

        let state = session.apply(identify("Asha", "Pune"), &classifier).unwrap();
        assert_eq!(state, &QuizState::AskingQuestion(0));

        let state = session.apply(answer("3"), &classifier).unwrap();
        assert_eq!(state, &QuizState::AskingQuestion(1));

        let state = session.apply(answer("belonging"), &classifier).unwrap();
        assert_eq!(state, &QuizState::Classified("Calm".to_string()));
        assert_eq!(session.answers(), ["Relaxed", "Belonging"]);
        assert_eq!(session.mood(), Some("Calm"));
    }

    #[rstest]
    fn test_answer_before_identity_is_rejected(catalog: MoodCatalog) {
        let classifier = MoodClassifier::new(&catalog);
        let mut session = Session::with_questions(&TWO_QUESTIONS);

        let err = session.apply(answer("1"), &classifier).unwrap_err();
        assert!(matches!(err, MapMuseError::Validation { .. }));
        assert_eq!(session.state(), &QuizState::CollectingIdentity);
    }

    #[rstest]
    #[case("", "Pune")]
    #[case("   ", "Pune")]
    #[case("Asha", "Atlantis")]
    fn test_invalid_identity(catalog: MoodCatalog, #[case] name: &str, #[case] city: &str) {
        let classifier = MoodClassifier::new(&catalog);
        let mut session = Session::with_questions(&TWO_QUESTIONS);

        assert!(session.apply(identify(name, city), &classifier).is_err());
        assert!(session.identity().is_none());
    }

    #[rstest]
    fn test_invalid_answer_keeps_state(catalog: MoodCatalog) {
        let classifier = MoodClassifier::new(&catalog);
        let mut session = Session::with_questions(&TWO_QUESTIONS);
        session.apply(identify("Asha", "Pune"), &classifier).unwrap();

        let err = session.apply(answer("Grumpy"), &classifier).unwrap_err();
        assert!(err.to_string().contains("not one of"));
        assert_eq!(session.state(), &QuizState::AskingQuestion(0));
        assert!(session.answers().is_empty());
    }

    #[rstest]
    fn test_answer_after_classification_is_rejected(catalog: MoodCatalog) {
        let classifier = MoodClassifier::new(&catalog);
        let mut session = Session::with_questions(&TWO_QUESTIONS);
        session.apply(identify("Asha", "Pune"), &classifier).unwrap();
        session.apply(answer("1"), &classifier).unwrap();
        session.apply(answer("1"), &classifier).unwrap();
        assert_eq!(session.mood(), Some("Stressed"));

        assert!(session.apply(answer("1"), &classifier).is_err());
        assert_eq!(session.answers().len(), 2);
    }

    #[rstest]
    fn test_same_identity_keeps_progress(catalog: MoodCatalog) {
        let classifier = MoodClassifier::new(&catalog);
        let mut session = Session::with_questions(&TWO_QUESTIONS);
        session.apply(identify("Asha", "Pune"), &classifier).unwrap();
        session.apply(answer("1"), &classifier).unwrap();

        let state = session.apply(identify(" Asha ", "Pune"), &classifier).unwrap();
        assert_eq!(state, &QuizState::AskingQuestion(1));
        assert_eq!(session.answers().len(), 1);
    }

    #[rstest]
    #[case("Ravi", "Pune")]
    #[case("Asha", "Goa")]
    fn test_identity_change_resets(catalog: MoodCatalog, #[case] name: &str, #[case] city: &str) {
        let classifier = MoodClassifier::new(&catalog);
        let mut session = Session::with_questions(&TWO_QUESTIONS);
        session.apply(identify("Asha", "Pune"), &classifier).unwrap();
        session.apply(answer("1"), &classifier).unwrap();
        session.apply(answer("1"), &classifier).unwrap();

        let state = session.apply(identify(name, city), &classifier).unwrap();
        assert_eq!(state, &QuizState::AskingQuestion(0));
        assert!(session.answers().is_empty());
        assert!(session.mood().is_none());
        assert_eq!(session.identity().unwrap().name, name);
    }

    #[rstest]
    fn test_reset_without_identity() {
        let mut session = Session::new();
        session.reset();
        assert_eq!(session.state(), &QuizState::CollectingIdentity);
        assert_eq!(session.questions().len(), 10);
    }
}
