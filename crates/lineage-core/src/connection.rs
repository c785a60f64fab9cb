use serde::{Deserialize, Serialize};

/// The fixed set of relationship kinds the heuristics can assign.
/// `Associated` is the generic fallback for figures that co-occur
/// without any stronger signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Mentor,
    Student,
    Colleague,
    Influenced,
    Rival,
    Friend,
    Admired,
    Associated,
}

impl RelationKind {
    /// Every kind carrying a weighted phrase corpus, in scoring order.
    pub const NAMED: [Self; 7] = [
        Self::Mentor,
        Self::Student,
        Self::Colleague,
        Self::Influenced,
        Self::Rival,
        Self::Friend,
        Self::Admired,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mentor => "mentor",
            Self::Student => "student",
            Self::Colleague => "colleague",
            Self::Influenced => "influenced",
            Self::Rival => "rival",
            Self::Friend => "friend",
            Self::Admired => "admired",
            Self::Associated => "associated",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mentor" => Ok(Self::Mentor),
            "student" => Ok(Self::Student),
            "colleague" => Ok(Self::Colleague),
            "influenced" => Ok(Self::Influenced),
            "rival" => Ok(Self::Rival),
            "friend" => Ok(Self::Friend),
            "admired" => Ok(Self::Admired),
            "associated" => Ok(Self::Associated),
            _ => Err(crate::Error::InvalidRelationKind(s.to_string())),
        }
    }
}

/// A directed edge between two figures. Strength is 1-10, or 0 when no
/// relationship was found; the description is a cleaned sentence of at
/// most 200 characters taken from the source page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
    pub strength: u8,
    pub description: String,
}

impl Connection {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: RelationKind,
    ) -> crate::Result<Self> {
        let source = source.into();
        let target = target.into();

        if source == target {
            return Err(crate::Error::SelfReference);
        }

        Ok(Self {
            source,
            target,
            kind,
            strength: 0,
            description: String::new(),
        })
    }

    #[must_use]
    pub fn with_strength(mut self, strength: u8) -> Self {
        self.strength = strength.min(10);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in RelationKind::NAMED {
            let parsed: RelationKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("archnemesis".parse::<RelationKind>().is_err());
    }

    #[test]
    fn test_self_reference_rejected() {
        let result = Connection::new("socrates", "socrates", RelationKind::Mentor);
        assert!(matches!(result, Err(crate::Error::SelfReference)));
    }

    #[test]
    fn test_strength_clamped() {
        let conn = Connection::new("socrates", "plato", RelationKind::Mentor)
            .unwrap()
            .with_strength(42);
        assert_eq!(conn.strength, 10);
    }

    #[test]
    fn test_wire_format_uses_type() {
        let conn = Connection::new("socrates", "plato", RelationKind::Mentor)
            .unwrap()
            .with_strength(9)
            .with_description("Socrates taught Plato.");
        let json = serde_json::to_value(&conn).unwrap();
        assert_eq!(json["type"], "mentor");
        assert_eq!(json["strength"], 9);
    }
}
