use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derive the stable identifier for a subject name: lowercase, spaces
/// to hyphens, everything outside `[a-z0-9-]` dropped. Idempotent, so
/// re-deriving from the same name always yields the same id.
#[must_use]
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Era {
    #[serde(rename = "Ancient (Pre-Classical)")]
    AncientPreClassical,
    #[serde(rename = "Classical Antiquity")]
    ClassicalAntiquity,
    #[serde(rename = "Ancient")]
    Ancient,
    #[serde(rename = "Early Medieval")]
    EarlyMedieval,
    #[serde(rename = "High Medieval")]
    HighMedieval,
    #[serde(rename = "Late Medieval")]
    LateMedieval,
    #[serde(rename = "Renaissance")]
    Renaissance,
    #[serde(rename = "Early Modern")]
    EarlyModern,
    #[serde(rename = "Modern")]
    Modern,
    #[serde(rename = "Contemporary")]
    Contemporary,
}

impl Era {
    /// Bucket a birth year into an era. A year of -500 lands in
    /// Classical Antiquity; 1914 lands in Contemporary.
    #[must_use]
    pub fn from_birth_year(year: i32) -> Self {
        match year {
            y if y < -800 => Self::AncientPreClassical,
            y if y <= -500 => Self::ClassicalAntiquity,
            y if y < 476 => Self::Ancient,
            y if y < 1000 => Self::EarlyMedieval,
            y if y < 1300 => Self::HighMedieval,
            y if y < 1500 => Self::LateMedieval,
            y if y < 1650 => Self::Renaissance,
            y if y < 1800 => Self::EarlyModern,
            y if y < 1914 => Self::Modern,
            _ => Self::Contemporary,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AncientPreClassical => "Ancient (Pre-Classical)",
            Self::ClassicalAntiquity => "Classical Antiquity",
            Self::Ancient => "Ancient",
            Self::EarlyMedieval => "Early Medieval",
            Self::HighMedieval => "High Medieval",
            Self::LateMedieval => "Late Medieval",
            Self::Renaissance => "Renaissance",
            Self::EarlyModern => "Early Modern",
            Self::Modern => "Modern",
            Self::Contemporary => "Contemporary",
        }
    }

    /// Visualization group. Eras cluster into six fixed buckets used
    /// for coloring nodes in the rendered graph.
    #[must_use]
    pub fn group(&self) -> u8 {
        match self {
            Self::AncientPreClassical | Self::ClassicalAntiquity | Self::Ancient => 1,
            Self::EarlyMedieval | Self::HighMedieval | Self::LateMedieval => 2,
            Self::Renaissance => 3,
            Self::EarlyModern => 4,
            Self::Modern => 5,
            Self::Contemporary => 6,
        }
    }
}

impl std::fmt::Display for Era {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A historical figure as produced by the extraction pipeline. Field
/// names on the wire match the graph API consumed by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub era: Era,
    pub profession: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub year_birth: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_death: Option<i32>,
    pub country: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub info: String,
    pub group: u8,
    pub scraped_at: DateTime<Utc>,
}

impl Person {
    /// A blank record for `name`; the attribute extractors fill in the
    /// rest. Era defaults to the unknown-birth-year bucket.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let era = Era::from_birth_year(0);
        Self {
            id: slug(&name),
            name,
            era,
            profession: String::new(),
            image_url: None,
            year_birth: 0,
            year_death: None,
            country: String::new(),
            info: String::new(),
            group: era.group(),
            scraped_at: Utc::now(),
        }
    }
}
