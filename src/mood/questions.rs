//! The quiz question bank

/// A single-choice quiz question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [&'static str; 4],
}

impl Question {
    /// Resolve user input to one of the options.
    ///
    /// Accepts a 1-based option number or the option text, case-insensitive.
    #[must_use]
    pub fn resolve(&self, input: &str) -> Option<&'static str> {
        let input = input.trim();
        if let Ok(number) = input.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|index| self.options.get(index))
                .copied();
        }

        self.options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(input))
            .copied()
    }
}

pub const QUESTIONS: [Question; 10] = [
    Question {
        prompt: "What's been weighing on your mind?",
        options: ["Deadlines", "Relationships", "Uncertainty", "Nothing much"],
    },
    Question {
        prompt: "Which word resonates most?",
        options: ["Overwhelmed", "Curious", "Content", "Restless"],
    },
    Question {
        prompt: "Your physical energy feels...",
        options: ["Tense", "Energized", "Relaxed", "Sluggish"],
    },
    Question {
        prompt: "Given a day off, you'd rather...",
        options: ["Stay in bed", "Take a walk", "Meet friends", "Try something new"],
    },
    Question {
        prompt: "Your mental clarity is...",
        options: ["Foggy", "Focused", "Distracted", "Inspired"],
    },
    Question {
        prompt: "Socially, you're feeling...",
        options: ["Withdrawn", "Exploratory", "Chatty", "Creative"],
    },
    Question {
        prompt: "You crave...",
        options: ["Comfort", "Excitement", "Belonging", "Sweetness"],
    },
    Question {
        prompt: "Your thoughts are...",
        options: ["Heavy", "Expansive", "Scattered", "Vivid"],
    },
    Question {
        prompt: "If emotions were weather...",
        options: ["Cloudy", "Windy", "Sunny", "Drizzling"],
    },
    Question {
        prompt: "You secretly wish for...",
        options: ["Stillness", "Adventure", "Connection", "Indulgence"],
    },
];
