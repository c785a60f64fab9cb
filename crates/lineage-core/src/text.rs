//! Shared text heuristics: citation scrubbing, tokenization, sentence
//! splitting, and year extraction. Everything here is intentionally
//! simple and inspectable; there is no statistical model behind it.

use std::sync::OnceLock;

use regex::Regex;

fn citation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\d+\]").unwrap())
}

fn bracket_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[.*?\]").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s']").unwrap())
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{4}\b").unwrap())
}

fn sentence_boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[.!?]["\s)]"#).unwrap())
}

/// Strip citation markers like `[1]` and any other bracketed spans,
/// then collapse runs of whitespace.
#[must_use]
pub fn clean(text: &str) -> String {
    let text = citation_re().replace_all(text, "");
    let text = bracket_re().replace_all(&text, "");
    whitespace_re().replace_all(&text, " ").trim().to_string()
}

/// Lowercase and strip punctuation (apostrophes survive so
/// contractions keep their shape), collapsing whitespace.
#[must_use]
pub fn normalize(text: &str) -> String {
    let text = text.to_lowercase();
    let text = punctuation_re().replace_all(&text, " ");
    whitespace_re().replace_all(&text, " ").trim().to_string()
}

/// All four-digit numbers in the text, in order of appearance.
#[must_use]
pub fn extract_years(text: &str) -> Vec<i32> {
    year_re()
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// First four-digit number, or 0 when none is present.
#[must_use]
pub fn extract_year(text: &str) -> i32 {
    extract_years(text).first().copied().unwrap_or(0)
}

/// Split at sentence-ending punctuation followed by whitespace, a
/// quote, or a closing parenthesis. Abbreviations fool it; that is an
/// accepted limitation of the heuristic.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut last = 0;

    for boundary in sentence_boundary_re().find_iter(text) {
        // The punctuation is one ASCII byte; the trailing character may
        // not be (non-breaking spaces show up in encyclopedia text), so
        // the sentence ends right after the punctuation.
        let end = boundary.start() + 1;
        let piece = text[last..end].trim();
        if !piece.is_empty() {
            sentences.push(piece.to_string());
        }
        last = boundary.end();
    }

    let tail = text[last..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Truncate to at most `max` characters, replacing the overflow with
/// an ellipsis. Operates on characters, not bytes.
#[must_use]
pub fn truncate_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_citations() {
        assert_eq!(
            clean("Plato[1] was a philosopher[note 2]  of Athens."),
            "Plato was a philosopher of Athens."
        );
    }

    #[test]
    fn test_normalize_keeps_apostrophes() {
        assert_eq!(normalize("Newton's  Laws, 1687!"), "newton's laws 1687");
    }

    #[test]
    fn test_extract_years_in_order() {
        assert_eq!(extract_years("born 1643, died 1727"), vec![1643, 1727]);
        assert_eq!(extract_year("no year here"), 0);
    }

    #[test]
    fn test_split_sentences() {
        let parts = split_sentences("One sentence. Another one! And a third? tail");
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "One sentence.");
        assert_eq!(parts[3], "tail");
    }

    #[test]
    fn test_split_sentences_non_breaking_space() {
        let parts =
            split_sentences("Socrates taught Plato.\u{a0}Plato founded the Academy.");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], "Socrates taught Plato.");
        assert_eq!(parts[1], "Plato founded the Academy.");
    }

    #[test]
    fn test_split_sentences_no_boundary() {
        let parts = split_sentences("Socrates was the teacher and mentor of Plato.");
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn test_truncate_ellipsis() {
        assert_eq!(truncate_ellipsis("short", 10), "short");
        let long = "x".repeat(30);
        let cut = truncate_ellipsis(&long, 20);
        assert_eq!(cut.chars().count(), 20);
        assert!(cut.ends_with("..."));
    }
}
