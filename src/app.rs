//! Interaction driver
//!
//! Wires the catalog, classifier, place resolver and restaurant lookup
//! together and runs the quiz either interactively over any reader/writer
//! pair or from pre-collected answers.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::catalog::{Mood, MoodCatalog};
use crate::config::MapMuseConfig;
use crate::models::Place;
use crate::mood::MoodClassifier;
use crate::place_resolver::PlaceResolver;
use crate::render;
use crate::restaurants::{MatchReport, OverpassClient, RestaurantMatcher, RestaurantProvider};
use crate::session::{QuizEvent, QuizState, Session};
use crate::MapMuseError;

/// Restaurant side of a recommendation
#[derive(Debug)]
pub enum RestaurantLookup {
    Found(MatchReport),
    /// The fetch failed; the matcher was not run
    Unavailable(MapMuseError),
}

/// Everything shown once a mood is known
#[derive(Debug)]
pub struct Recommendation<'a> {
    pub mood: &'a Mood,
    pub places: &'a [Place],
    pub restaurants: RestaurantLookup,
}

impl Recommendation<'_> {
    /// Render the full result screen
    #[must_use]
    pub fn render(&self, name: &str, city: &str) -> String {
        let mut out = render::mood_summary(name, city, self.mood);
        out.push_str("---\n");
        out.push_str(&render::curated_places(self.mood, self.places));
        out.push_str("---\n");
        match &self.restaurants {
            RestaurantLookup::Found(report) => {
                out.push_str(&render::restaurants(report, self.places.first()));
            }
            RestaurantLookup::Unavailable(err) => {
                out.push_str(&err.user_message());
                out.push('\n');
            }
        }
        out
    }
}

/// The application: an immutable catalog plus the restaurant lookup
pub struct App {
    catalog: MoodCatalog,
    matcher: RestaurantMatcher,
    provider: Box<dyn RestaurantProvider>,
}

impl App {
    #[must_use]
    pub fn new(
        catalog: MoodCatalog,
        matcher: RestaurantMatcher,
        provider: Box<dyn RestaurantProvider>,
    ) -> Self {
        Self {
            catalog,
            matcher,
            provider,
        }
    }

    /// Build the application from configuration; a bad catalog is fatal
    pub fn from_config(config: &MapMuseConfig) -> Result<Self> {
        let catalog = MoodCatalog::load(&config.catalog.path)
            .with_context(|| "Failed to load mood catalog")?;
        let provider = OverpassClient::new(&config.overpass)
            .with_context(|| "Failed to create Overpass client")?;
        let matcher = RestaurantMatcher::new(config.matching.policy());

        Ok(Self::new(catalog, matcher, Box::new(provider)))
    }

    #[must_use]
    pub fn catalog(&self) -> &MoodCatalog {
        &self.catalog
    }

    /// Resolve places and fetch restaurants for a classified mood
    pub async fn recommend<'a>(&'a self, mood: &'a Mood, city: &str) -> Recommendation<'a> {
        let places = PlaceResolver::new(&self.catalog).resolve(&mood.name, city);

        let restaurants = match self.provider.fetch_restaurants(city).await {
            Ok(records) => {
                RestaurantLookup::Found(self.matcher.partition(&mood.cuisine_tags, records))
            }
            Err(e) => {
                warn!("Restaurant lookup failed: {}", e);
                RestaurantLookup::Unavailable(e.into())
            }
        };

        Recommendation {
            mood,
            places,
            restaurants,
        }
    }

    /// Run a complete quiz from pre-collected answers
    pub async fn recommend_for_answers(
        &self,
        name: &str,
        city: &str,
        answers: &[String],
    ) -> Result<String> {
        let classifier = MoodClassifier::new(&self.catalog);
        let mut session = Session::new();

        session.apply(
            QuizEvent::Identify {
                name: name.to_string(),
                city: city.to_string(),
            },
            &classifier,
        )?;

        let expected = session.questions().len();
        if answers.len() != expected {
            bail!(MapMuseError::validation(format!(
                "expected {expected} answers, got {}",
                answers.len()
            )));
        }

        for answer in answers {
            session.apply(QuizEvent::Answer(answer.clone()), &classifier)?;
        }

        self.present(&session).await
    }

    /// Drive the quiz over a line-based reader and writer.
    ///
    /// A blank name (or end of input) ends the program. Entering the same
    /// name and city again shows the previous result; anything else starts over.
    pub async fn run_interactive<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<()> {
        let classifier = MoodClassifier::new(&self.catalog);
        let cities = self.catalog.cities();
        let mut session = Session::new();

        write!(output, "{}", render::banner())?;

        loop {
            let Some(name) = prompt(&mut input, &mut output, "Your name (blank to quit): ")? else {
                break;
            };
            if name.is_empty() {
                break;
            }

            let Some(city) = Self::ask_city(&mut input, &mut output, &cities)? else {
                break;
            };

            if let Err(e) = session.apply(QuizEvent::Identify { name, city }, &classifier) {
                writeln!(output, "{}", e.user_message())?;
                continue;
            }

            writeln!(output, "\n🧠 How are you feeling today?")?;
            while let Some(question) = session.current_question() {
                let index = session.answers().len();
                write!(output, "\n{}", render::question(index, question))?;
                let Some(reply) = prompt(&mut input, &mut output, "Choose one: ")? else {
                    return Ok(());
                };
                if let Err(e) = session.apply(QuizEvent::Answer(reply), &classifier) {
                    writeln!(output, "{}", e.user_message())?;
                }
            }

            let screen = self.present(&session).await?;
            writeln!(output, "\n{screen}")?;
        }

        info!("Quiz ended");
        Ok(())
    }

    fn ask_city<R: BufRead, W: Write>(
        input: &mut R,
        output: &mut W,
        cities: &[String],
    ) -> Result<Option<String>> {
        writeln!(output, "Select your city:")?;
        write!(output, "{}", render::city_menu(cities))?;

        loop {
            let Some(reply) = prompt(input, output, "City: ")? else {
                return Ok(None);
            };

            let chosen = match reply.parse::<usize>() {
                Ok(number) => number.checked_sub(1).and_then(|i| cities.get(i)),
                Err(_) => cities.iter().find(|city| city.eq_ignore_ascii_case(&reply)),
            };

            match chosen {
                Some(city) => return Ok(Some(city.clone())),
                None => writeln!(output, "Please pick one of the listed cities.")?,
            }
        }
    }

    async fn present(&self, session: &Session) -> Result<String> {
        let (Some(identity), QuizState::Classified(mood_name)) = (session.identity(), session.state())
        else {
            bail!("quiz is not complete");
        };

        let mood = self
            .catalog
            .get(mood_name)
            .with_context(|| format!("classified mood '{mood_name}' is not in the catalog"))?;

        let recommendation = self.recommend(mood, &identity.city).await;
        Ok(recommendation.render(&identity.name, &identity.city))
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
