use std::sync::Arc;

use regex::Regex;
use serde::Serialize;

use crate::connection::RelationKind;
use crate::lexicon::Lexicon;
use crate::text;

/// A classified score must clear this bar before a named kind is
/// assigned; weaker signals fall back to `associated` or nothing.
const CONFIDENCE_FLOOR: f64 = 1.0;
/// Fixed confidence assigned to the co-occurrence fallback.
const ASSOCIATED_CONFIDENCE: f64 = 0.5;

const DESCRIPTION_LIMIT: usize = 200;
const NAME_BONUS: i32 = 2;
const PHRASE_BONUS: i32 = 3;

/// Outcome of classifying a piece of text for a source/target pair.
/// `kind` is `None` when no relationship was found; strength is then 0.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub kind: Option<RelationKind>,
    pub strength: u8,
    pub description: String,
}

/// Scores free text against the lexicon and picks the most plausible
/// relationship, with a human-readable description sentence.
pub struct Classifier {
    lexicon: Arc<Lexicon>,
}

impl Classifier {
    #[must_use]
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn classify(&self, sample: &str, source: &str, target: &str) -> Classification {
        let scores = self.lexicon.score(sample);

        // Fixed kind order keeps tie-breaking deterministic.
        let mut best: Option<(RelationKind, f64)> = None;
        for kind in RelationKind::NAMED {
            if let Some(&score) = scores.get(&kind) {
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((kind, score));
                }
            }
        }

        if best.is_none_or(|(_, s)| s < CONFIDENCE_FLOOR) {
            best = if sample.to_lowercase().contains(&target.to_lowercase()) {
                Some((RelationKind::Associated, ASSOCIATED_CONFIDENCE))
            } else {
                None
            };
        }

        let strength = match best {
            None => 0,
            Some((_, score)) if score > 10.0 => 10,
            Some((_, score)) => score.ceil().clamp(1.0, 10.0) as u8,
        };

        let description = self.describe(sample, source, target, best.map(|(kind, _)| kind));

        Classification {
            kind: best.map(|(kind, _)| kind),
            strength,
            description,
        }
    }

    /// Pick the sentence that best evidences the relationship: +2 for
    /// each of the two names, +3 for any lexicon phrase of the winning
    /// kind. First highest-scoring sentence wins; when nothing scores,
    /// a generic description is synthesized.
    fn describe(
        &self,
        sample: &str,
        source: &str,
        target: &str,
        kind: Option<RelationKind>,
    ) -> String {
        let phrases = kind.map(|k| self.lexicon.phrases(k)).unwrap_or_default();
        // Whole-word matches only, so "platonic" does not credit "plato".
        let source_re = word_regex(source);
        let target_re = word_regex(target);

        let mut best_sentence: Option<String> = None;
        let mut best_score = 0;

        for sentence in text::split_sentences(sample) {
            let lower = sentence.to_lowercase();
            let mut score = 0;

            if source_re.as_ref().is_some_and(|re| re.is_match(&lower)) {
                score += NAME_BONUS;
            }
            if target_re.as_ref().is_some_and(|re| re.is_match(&lower)) {
                score += NAME_BONUS;
            }
            if phrases.iter().any(|p| lower.contains(p.as_str())) {
                score += PHRASE_BONUS;
            }

            if score > best_score {
                best_score = score;
                best_sentence = Some(sentence);
            }
        }

        best_sentence.map_or_else(
            || format!("{source} and {target} were connected in historical context."),
            |sentence| text::truncate_ellipsis(&text::clean(&sentence), DESCRIPTION_LIMIT),
        )
    }
}

/// Word-bounded matcher for a lowercased name. Escaping makes the
/// pattern infallible for any input, so a build failure just disables
/// the bonus instead of panicking.
fn word_regex(name: &str) -> Option<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(&name.to_lowercase()))).ok()
}
