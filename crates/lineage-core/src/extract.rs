//! Attribute extractors. Each routine tolerates missing data and
//! degrades to a documented default instead of failing: a zero year,
//! "Unknown" country, or the generic "Historical Figure" profession.

use crate::page::ArticlePage;
use crate::person::{Era, Person};
use crate::text;

/// Profession vocabulary, first match wins. Matching is substring
/// based over the lowercased first paragraph.
const PROFESSIONS: &[&str] = &[
    "philosopher",
    "scientist",
    "physicist",
    "mathematician",
    "writer",
    "artist",
    "politician",
    "leader",
    "general",
    "composer",
    "inventor",
    "explorer",
    "king",
    "queen",
    "emperor",
    "empress",
    "president",
    "prime minister",
];

const COUNTRY_LABELS: &[&str] = &["Nationality", "Country", "Born", "Citizenship"];

const BIO_LIMIT: usize = 500;

/// Run every extractor over a parsed page and assemble the record.
#[must_use]
pub fn extract_person(name: &str, page: &ArticlePage) -> Person {
    let mut person = Person::new(name);

    let (birth, death) = lifespan(page);
    person.year_birth = birth;
    person.year_death = (death != 0).then_some(death);

    person.era = Era::from_birth_year(birth);
    person.group = person.era.group();
    person.profession = profession(page);
    person.country = country(page);
    person.info = biography(page);

    person
}

/// Birth and death years. Structured infobox dates win; otherwise the
/// first two four-digit numbers of the lead paragraph, in textual
/// order. Zero means unknown.
#[must_use]
pub fn lifespan(page: &ArticlePage) -> (i32, i32) {
    let mut birth = page
        .birth_date_text
        .as_deref()
        .map(text::extract_year)
        .unwrap_or(0);
    let mut death = page
        .death_date_text
        .as_deref()
        .map(text::extract_year)
        .unwrap_or(0);

    if birth == 0 || death == 0 {
        let years = page
            .first_paragraph()
            .map(text::extract_years)
            .unwrap_or_default();

        if birth == 0 {
            if let Some(&year) = years.first() {
                birth = year;
            }
        }
        if death == 0 {
            if let Some(&year) = years.get(1) {
                death = year;
            }
        }
    }

    (birth, death)
}

/// First profession keyword found in the lead paragraph, title cased.
#[must_use]
pub fn profession(page: &ArticlePage) -> String {
    let first_para = page.first_paragraph().unwrap_or_default().to_lowercase();

    PROFESSIONS
        .iter()
        .find(|p| first_para.contains(**p))
        .map_or_else(|| "Historical Figure".to_string(), |p| title_case(p))
}

/// Country from the infobox, trying Nationality, Country, Born, and
/// Citizenship labels in that order. A Born field usually ends with
/// the country, so its last comma-separated segment is taken.
#[must_use]
pub fn country(page: &ArticlePage) -> String {
    for label in COUNTRY_LABELS {
        let Some(raw) = page.infobox_value(label) else {
            continue;
        };

        let mut value = text::clean(raw);
        if *label == "Born" {
            if let Some(last) = value.rsplit(',').next() {
                value = last.trim().to_string();
            }
        }

        if !value.is_empty() {
            return value;
        }
    }

    "Unknown".to_string()
}

/// Lead paragraph with citations stripped, capped at 500 characters.
#[must_use]
pub fn biography(page: &ArticlePage) -> String {
    let bio = text::clean(page.first_paragraph().unwrap_or_default());
    text::truncate_ellipsis(&bio, BIO_LIMIT)
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
