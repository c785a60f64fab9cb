//! Relationship discovery: scan a subject's page content for every
//! name in the known-names registry and turn co-occurrences into
//! candidate connections. Uses its own fixed keyword table, distinct
//! from (though overlapping) the classifier's lexicon.

use tracing::debug;

use crate::connection::{Connection, RelationKind};
use crate::person::slug;
use crate::registry::KnownNames;
use crate::text;

const KEYWORDS: &[(RelationKind, &[&str])] = &[
    (
        RelationKind::Mentor,
        &["mentor", "teacher", "taught", "tutored", "educated", "guided"],
    ),
    (
        RelationKind::Student,
        &["student", "pupil", "studied under", "learned from", "disciple"],
    ),
    (
        RelationKind::Colleague,
        &["colleague", "associate", "worked with", "collaborated", "partnered"],
    ),
    (
        RelationKind::Influenced,
        &["influenced", "inspired", "impact on", "affected the thinking", "shaped the views"],
    ),
    (
        RelationKind::Rival,
        &["rival", "opponent", "adversary", "competed", "disagreed", "disputed", "contested"],
    ),
    (
        RelationKind::Friend,
        &["friend", "companion", "close to", "confidant"],
    ),
    (
        RelationKind::Admired,
        &["admired", "respected", "honored", "looked up to", "esteemed"],
    ),
];

/// Strength floor for figures that co-occur without any keyword hit.
const CO_MENTION_STRENGTH: u8 = 3;
const DESCRIPTION_LIMIT: usize = 200;

#[derive(Default)]
pub struct DiscoveryEngine;

impl DiscoveryEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Candidate connections from a subject's page content. Every
    /// registry name literally present in the content (other than the
    /// subject itself) yields exactly one connection; absent names
    /// yield nothing.
    #[must_use]
    pub fn discover(
        &self,
        source_id: &str,
        content: &str,
        registry: &KnownNames,
    ) -> Vec<Connection> {
        let content_lower = content.to_lowercase();
        let mut connections = Vec::new();

        for name in registry.names() {
            let target_id = slug(&name);
            if target_id == source_id || target_id.is_empty() {
                continue;
            }

            if !content_lower.contains(&name) {
                continue;
            }

            let Some((kind, strength, description)) = determine(content, &name) else {
                continue;
            };

            let Ok(connection) = Connection::new(source_id, &target_id, kind) else {
                continue;
            };
            connections.push(
                connection
                    .with_strength(strength)
                    .with_description(description),
            );
        }

        debug!(
            source = source_id,
            count = connections.len(),
            "discovered connections"
        );
        connections
    }
}

/// Work out kind, strength, and description for one mentioned name.
/// The first paragraph containing both a keyword and the name decides
/// the kind; mention counts across the relevant paragraphs set the
/// strength. Falls back to a generic association when paragraphs
/// mention the name but no keyword matches.
fn determine(content: &str, name: &str) -> Option<(RelationKind, u8, String)> {
    let relevant: Vec<&str> = content
        .split('\n')
        .filter(|para| para.to_lowercase().contains(name))
        .collect();

    if relevant.is_empty() {
        return None;
    }

    for (kind, keywords) in KEYWORDS {
        for keyword in *keywords {
            for paragraph in &relevant {
                if paragraph.to_lowercase().contains(keyword) {
                    let description = relevant_sentence(paragraph, Some(keyword), name);
                    let strength = mention_strength(&relevant, keyword);
                    return Some((*kind, strength, description));
                }
            }
        }
    }

    Some((
        RelationKind::Associated,
        CO_MENTION_STRENGTH,
        relevant_sentence(relevant[0], None, name),
    ))
}

/// The sentence of a paragraph that best describes the relationship:
/// first one containing both keyword and name, else the first one
/// naming the target, else a canned fallback.
fn relevant_sentence(paragraph: &str, keyword: Option<&str>, name: &str) -> String {
    let sentences = text::split_sentences(paragraph);

    for sentence in &sentences {
        let lower = sentence.to_lowercase();
        let keyword_hit = keyword.is_none_or(|k| lower.contains(k));
        if keyword_hit && lower.contains(name) {
            return text::truncate_ellipsis(&text::clean(sentence), DESCRIPTION_LIMIT);
        }
    }

    for sentence in &sentences {
        if sentence.to_lowercase().contains(name) {
            return text::truncate_ellipsis(&text::clean(sentence), DESCRIPTION_LIMIT);
        }
    }

    "Connected in historical context.".to_string()
}

/// More paragraphs repeating the keyword alongside the name mean a
/// stronger relationship.
fn mention_strength(relevant: &[&str], keyword: &str) -> u8 {
    let mentions = relevant
        .iter()
        .filter(|para| para.to_lowercase().contains(keyword))
        .count();

    match mentions {
        n if n >= 5 => 10,
        4 => 8,
        3 => 7,
        2 => 5,
        1 => 4,
        _ => CO_MENTION_STRENGTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(names: &[&str]) -> KnownNames {
        let registry = KnownNames::new();
        for name in names {
            registry.insert(name);
        }
        registry
    }

    #[test]
    fn test_discovers_mentor_connection() {
        let registry = registry_with(&["Socrates", "Plato"]);
        let content = "Plato studied in Athens.\nSocrates was the teacher of Plato.\n";

        let connections = DiscoveryEngine::new().discover("plato", content, &registry);

        assert_eq!(connections.len(), 1);
        let conn = &connections[0];
        assert_eq!(conn.target, "socrates");
        assert_eq!(conn.kind, RelationKind::Mentor);
        assert_eq!(conn.strength, 4);
        assert!(conn.description.contains("teacher"));
    }

    #[test]
    fn test_skips_self_and_absent_names() {
        let registry = registry_with(&["Plato", "Aristotle"]);
        let content = "Plato founded the Academy.\n";

        let connections = DiscoveryEngine::new().discover("plato", content, &registry);
        assert!(connections.is_empty());
    }

    #[test]
    fn test_generic_association_without_keywords() {
        let registry = registry_with(&["Plato", "Pythagoras"]);
        let content = "Later authors list Pythagoras among earlier thinkers.\n";

        let connections = DiscoveryEngine::new().discover("plato", content, &registry);

        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].kind, RelationKind::Associated);
        assert_eq!(connections[0].strength, 3);
    }

    #[test]
    fn test_mention_count_buckets() {
        let para = "Socrates was the teacher of Plato.";
        for (copies, expected) in [(1, 4), (2, 5), (3, 7), (4, 8), (5, 10), (7, 10)] {
            let relevant = vec![para; copies];
            assert_eq!(mention_strength(&relevant, "teacher"), expected);
        }
    }

    #[test]
    fn test_strength_always_in_range() {
        let registry = registry_with(&["Socrates", "Pythagoras", "Aristotle"]);
        let content = "Socrates taught and taught.\nPythagoras is merely listed.\n\
                       Aristotle was a rival, opponent, and adversary.\n";

        for conn in DiscoveryEngine::new().discover("plato", content, &registry) {
            assert!((1..=10).contains(&conn.strength));
        }
    }
}
