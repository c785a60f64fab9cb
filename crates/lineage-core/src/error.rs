use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] crate::fetch::FetchError),

    #[error("Parse failed: {0}")]
    Parse(#[from] crate::page::ParseError),

    #[error("Already in flight: {0}")]
    AlreadyInFlight(String),

    #[error("Invalid relationship kind: {0}")]
    InvalidRelationKind(String),

    #[error("Self-referential connection not allowed")]
    SelfReference,
}

impl Error {
    /// Whether the caller raced another request for the same subject.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyInFlight(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
