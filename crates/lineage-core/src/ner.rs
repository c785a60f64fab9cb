//! Heuristic named-entity recognition: capitalization patterns plus a
//! stopword filter. Transparent by design; no statistical model.

use std::collections::HashSet;

use regex::Regex;

/// Single capitalized words that are grammar, months, or weekdays
/// rather than names. Two-word matches led by one of these are also
/// rejected ("The King", "His Majesty").
const NER_STOPWORDS: &[&str] = &[
    "The", "A", "An", "This", "That", "These", "Those", "It", "They", "I", "We", "You", "He",
    "She", "His", "Her", "Their", "Our", "Your", "Its", "January", "February", "March", "April",
    "May", "June", "July", "August", "September", "October", "November", "December", "Monday",
    "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

pub struct EntityRecognizer {
    title_re: Regex,
    name_re: Regex,
}

impl EntityRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            // An honorific or title followed by one to four capitalized words.
            title_re: Regex::new(
                r"(Mr\.|Mrs\.|Ms\.|Dr\.|Prof\.|Sir|Lord|Lady|King|Queen|Emperor|Empress|Prince|Princess|Duke|Duchess|Pope|Saint|President|Prime Minister)\s+([A-Z][a-z]+)(\s+[A-Z][a-z]+){0,3}",
            )
            .unwrap(),
            // A bare run of one to four capitalized words.
            name_re: Regex::new(r"\b([A-Z][a-z]+)(\s+[A-Z][a-z]+){0,3}\b").unwrap(),
        }
    }

    /// Candidate person names in first-seen order. Finite and
    /// restartable; no ordering guarantee beyond first occurrence.
    #[must_use]
    pub fn extract(&self, raw_text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();

        let candidates = self
            .title_re
            .find_iter(raw_text)
            .chain(self.name_re.find_iter(raw_text))
            .map(|m| m.as_str());

        for candidate in candidates {
            if !Self::plausible_name(candidate) {
                continue;
            }
            if seen.insert(candidate.to_string()) {
                names.push(candidate.to_string());
            }
        }

        names
    }

    fn plausible_name(candidate: &str) -> bool {
        let words: Vec<&str> = candidate.split_whitespace().collect();
        match words.as_slice() {
            [] => false,
            [only] => !NER_STOPWORDS.contains(only),
            [first, _] => !NER_STOPWORDS.contains(first),
            _ => true,
        }
    }
}

impl Default for EntityRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
