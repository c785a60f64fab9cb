pub mod classify;
pub mod config;
pub mod connection;
pub mod discover;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod inflight;
pub mod lexicon;
pub mod ner;
pub mod orchestrator;
pub mod page;
pub mod person;
pub mod registry;
pub mod store;
pub mod text;

pub use classify::{Classification, Classifier};
pub use config::CrawlConfig;
pub use connection::{Connection, RelationKind};
pub use discover::DiscoveryEngine;
pub use error::{Error, Result};
pub use fetch::{FetchError, PageFetcher, PageSource, SearchHit};
pub use inflight::{InFlight, InFlightGuard};
pub use lexicon::Lexicon;
pub use ner::EntityRecognizer;
pub use orchestrator::{BatchOutcome, Orchestrator};
pub use page::{ArticlePage, InfoboxRow, ParseError};
pub use person::{slug, Era, Person};
pub use registry::KnownNames;
pub use store::{GraphData, GraphStore, MemoryGraph};
