//! Weighted phrase corpora per relationship kind, with online
//! reinforcement. The tables are data, not control flow: scoring walks
//! whatever the lexicon currently holds, so the heuristics stay
//! tunable without touching the classifier.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::connection::RelationKind;
use crate::text;

/// Weight applied to multi-word phrases found verbatim.
const PHRASE_BONUS: f64 = 1.5;
/// Weight applied to tokens that extend a phrase by up to three
/// characters, a cheap stand-in for stemming.
const STEM_FACTOR: f64 = 0.7;
/// Longest suffix a token may add to a phrase and still count.
const STEM_SLACK: usize = 3;

const MAX_WEIGHT: u8 = 10;
const LEARNED_WEIGHT: u8 = 3;
const MIN_TOKEN_LEN: usize = 3;
const MIN_FREQUENCY: usize = 2;

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "with", "by", "as",
    "of", "from", "was", "were", "is", "are", "be", "been", "has", "have", "had",
];

const SEED: &[(RelationKind, &[(&str, u8)])] = &[
    (
        RelationKind::Mentor,
        &[
            ("mentor", 10),
            ("teacher", 9),
            ("taught", 8),
            ("guide", 7),
            ("instruct", 7),
            ("train", 6),
            ("tutor", 9),
            ("educate", 7),
            ("master", 6),
            ("professor", 6),
            ("advise", 5),
            ("supervise", 5),
            ("coach", 5),
            ("counsel", 4),
            ("direct", 3),
        ],
    ),
    (
        RelationKind::Student,
        &[
            ("student", 10),
            ("pupil", 9),
            ("disciple", 8),
            ("apprentice", 8),
            ("protégé", 7),
            ("follower", 6),
            ("studied under", 9),
            ("learned from", 8),
            ("trainee", 6),
            ("mentee", 7),
            ("educated by", 7),
            ("tutored by", 8),
            ("guided by", 6),
            ("influenced by", 5),
            ("school of", 5),
        ],
    ),
    (
        RelationKind::Colleague,
        &[
            ("colleague", 10),
            ("associate", 8),
            ("collaborator", 9),
            ("partner", 8),
            ("coworker", 8),
            ("ally", 6),
            ("contemporary", 5),
            ("peer", 7),
            ("fellow", 6),
            ("worked with", 9),
            ("collaborated with", 9),
            ("joined forces", 7),
            ("teamed up", 7),
            ("together", 4),
            ("alongside", 6),
        ],
    ),
    (
        RelationKind::Influenced,
        &[
            ("influenced", 10),
            ("inspired", 9),
            ("affected", 7),
            ("shaped", 8),
            ("impacted", 8),
            ("changed", 6),
            ("transformed", 7),
            ("informed", 6),
            ("guided", 5),
            ("swayed", 6),
            ("impressed", 5),
            ("sway over", 6),
            ("impact on", 8),
            ("effect on", 7),
            ("inspiration for", 9),
        ],
    ),
    (
        RelationKind::Rival,
        &[
            ("rival", 10),
            ("opponent", 9),
            ("competitor", 8),
            ("adversary", 9),
            ("enemy", 7),
            ("foe", 7),
            ("antagonist", 8),
            ("critic", 6),
            ("contested", 7),
            ("challenged", 6),
            ("disputed with", 8),
            ("disagreed with", 7),
            ("opposed", 8),
            ("contended with", 7),
            ("conflict", 6),
        ],
    ),
    (
        RelationKind::Friend,
        &[
            ("friend", 10),
            ("companion", 8),
            ("ally", 7),
            ("confidant", 9),
            ("close", 6),
            ("intimate", 8),
            ("buddy", 7),
            ("pal", 6),
            ("associate", 5),
            ("comrade", 7),
            ("acquaintance", 4),
            ("fellowship", 6),
            ("friendship", 10),
            ("friendly", 5),
            ("amicable", 6),
        ],
    ),
    (
        RelationKind::Admired,
        &[
            ("admired", 10),
            ("respected", 8),
            ("revered", 9),
            ("esteemed", 8),
            ("venerated", 9),
            ("looked up to", 8),
            ("honored", 7),
            ("praised", 6),
            ("acclaimed", 7),
            ("celebrated", 6),
            ("idolized", 9),
            ("hero", 8),
            ("model", 6),
            ("idol", 8),
            ("exemplar", 7),
        ],
    ),
];

type Corpus = HashMap<RelationKind, HashMap<String, u8>>;

/// Phrase→weight tables for every named relationship kind. Shared
/// read / exclusive write: scoring takes the read lock, reinforcement
/// the write lock, so readers never see a half-applied update.
pub struct Lexicon {
    corpus: RwLock<Corpus>,
}

impl Lexicon {
    /// A lexicon seeded with the built-in relationship corpora.
    #[must_use]
    pub fn seeded() -> Self {
        let corpus = SEED
            .iter()
            .map(|(kind, phrases)| {
                let table = phrases
                    .iter()
                    .map(|(phrase, weight)| ((*phrase).to_string(), *weight))
                    .collect();
                (*kind, table)
            })
            .collect();

        Self {
            corpus: RwLock::new(corpus),
        }
    }

    /// Score text against every kind's corpus. Multi-word phrases hit
    /// as substrings at `weight * 1.5`; single words score full weight
    /// per exact token and `weight * 0.7` per near-prefix token. Raw
    /// scores are divided by the square root of the token count to
    /// correct for length bias; only positive scores are returned.
    #[must_use]
    pub fn score(&self, raw_text: &str) -> HashMap<RelationKind, f64> {
        let processed = text::normalize(raw_text);
        let tokens: Vec<&str> = processed.split_whitespace().collect();

        let mut scores = HashMap::new();
        if tokens.is_empty() {
            return scores;
        }

        let corpus = self.corpus.read();
        let length_correction = (tokens.len() as f64).sqrt();

        for (kind, table) in corpus.iter() {
            let mut score = 0.0;

            for (phrase, weight) in table {
                let weight = f64::from(*weight);

                if phrase.contains(' ') {
                    if processed.contains(phrase.as_str()) {
                        score += weight * PHRASE_BONUS;
                    }
                    continue;
                }

                for token in &tokens {
                    if *token == phrase.as_str() {
                        score += weight;
                    }
                    if token.starts_with(phrase.as_str())
                        && token.len() <= phrase.len() + STEM_SLACK
                    {
                        score += weight * STEM_FACTOR;
                    }
                }
            }

            let normalized = score / length_correction;
            if normalized > 0.0 {
                scores.insert(*kind, normalized);
            }
        }

        scores
    }

    /// All phrases currently known for a kind.
    #[must_use]
    pub fn phrases(&self, kind: RelationKind) -> Vec<String> {
        self.corpus
            .read()
            .get(&kind)
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Current weight of a phrase, if present.
    #[must_use]
    pub fn weight(&self, kind: RelationKind, phrase: &str) -> Option<u8> {
        self.corpus.read().get(&kind)?.get(phrase).copied()
    }

    /// Learn from a text sample known to express `kind`: tokens seen at
    /// least twice (ignoring stopwords and short words) bump existing
    /// weights by one, capped at ten, or enter the table at three.
    pub fn reinforce(&self, sample: &str, kind: RelationKind) {
        if !self.corpus.read().contains_key(&kind) {
            return;
        }

        let processed = text::normalize(sample);
        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        for token in processed.split_whitespace() {
            if token.len() >= MIN_TOKEN_LEN && !STOPWORDS.contains(&token) {
                *frequencies.entry(token).or_default() += 1;
            }
        }

        let mut corpus = self.corpus.write();
        let Some(table) = corpus.get_mut(&kind) else {
            return;
        };

        for (token, count) in frequencies {
            if count < MIN_FREQUENCY {
                continue;
            }
            table
                .entry(token.to_string())
                .and_modify(|w| *w = (*w + 1).min(MAX_WEIGHT))
                .or_insert(LEARNED_WEIGHT);
        }
    }

    /// The `n` heaviest phrases for a kind, heaviest first.
    #[must_use]
    pub fn top_indicators(&self, kind: RelationKind, n: usize) -> Vec<String> {
        let corpus = self.corpus.read();
        let Some(table) = corpus.get(&kind) else {
            return Vec::new();
        };

        let mut pairs: Vec<(&String, u8)> = table.iter().map(|(p, w)| (p, *w)).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        pairs.into_iter().take(n).map(|(p, _)| p.clone()).collect()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::seeded()
    }
}
