//! End-to-end pipeline tests over a canned page source: scraping,
//! batch partial failure, in-flight dedup, and discovery.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use lineage_core::fetch::{FetchError, FetchResult};
use lineage_core::page::ArticlePage;
use lineage_core::{CrawlConfig, Error, Orchestrator, PageSource, RelationKind};

struct FakeSource {
    pages: HashMap<String, ArticlePage>,
    delay: Duration,
}

impl FakeSource {
    fn new(delay: Duration) -> Self {
        Self {
            pages: HashMap::new(),
            delay,
        }
    }

    fn with_page(mut self, subject: &str, paragraphs: &[&str]) -> Self {
        let page = ArticlePage {
            title: Some(subject.to_string()),
            paragraphs: paragraphs.iter().map(ToString::to_string).collect(),
            ..ArticlePage::default()
        };
        self.pages.insert(subject.to_lowercase(), page);
        self
    }
}

#[async_trait]
impl PageSource for FakeSource {
    async fn fetch(&self, subject: &str) -> FetchResult<ArticlePage> {
        tokio::time::sleep(self.delay).await;
        self.pages
            .get(&subject.to_lowercase())
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: format!("fake://{subject}"),
            })
    }
}

fn test_config() -> CrawlConfig {
    CrawlConfig {
        politeness_delay_ms: 0,
        ..CrawlConfig::default()
    }
}

fn philosophers(delay: Duration) -> Arc<Orchestrator> {
    let source = FakeSource::new(delay)
        .with_page(
            "Socrates",
            &["Socrates (470-399 BC) was a Greek philosopher from Athens."],
        )
        .with_page(
            "Plato",
            &[
                "Plato (428-348 BC) was a Greek philosopher.",
                "Socrates was the teacher and mentor of Plato.",
            ],
        );

    Arc::new(Orchestrator::with_source(Arc::new(source), test_config()))
}

#[tokio::test]
async fn test_scrape_one_extracts_and_registers() {
    let orchestrator = philosophers(Duration::ZERO);

    let person = orchestrator.scrape_one("Plato").await.unwrap();

    assert_eq!(person.id, "plato");
    assert_eq!(person.profession, "Philosopher");
    assert!(orchestrator.registry().contains("Plato"));
    assert!(orchestrator.in_flight().is_empty());
}

#[tokio::test]
async fn test_concurrent_duplicate_is_conflict() {
    let orchestrator = philosophers(Duration::from_millis(100));

    let (first, second) = tokio::join!(
        orchestrator.scrape_one("Socrates"),
        orchestrator.scrape_one("socrates"),
    );

    let results = [first, second];
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(Error::AlreadyInFlight(_))))
        .count();

    assert_eq!(conflicts, 1);
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(orchestrator.in_flight().is_empty());
}

#[tokio::test]
async fn test_batch_partial_failure_keeps_successes() {
    let orchestrator = philosophers(Duration::ZERO);
    let names = vec![
        "Socrates".to_string(),
        "Plato".to_string(),
        "Nobody Of Note".to_string(),
    ];

    let outcome = orchestrator.scrape_many(&names).await;

    assert_eq!(outcome.success_count(), 2);
    assert_eq!(outcome.failure_count(), 1);
    assert!(outcome.is_partial());
    assert_eq!(outcome.failed[0].0, "Nobody Of Note");
    assert!(orchestrator.in_flight().is_empty());
}

#[tokio::test]
async fn test_discovery_finds_mentor_after_scraping() {
    let orchestrator = philosophers(Duration::ZERO);
    let names = vec!["Socrates".to_string(), "Plato".to_string()];

    let scraped = orchestrator.scrape_many(&names).await;
    assert!(!scraped.is_partial());

    let connections = orchestrator.discover_relationships("plato").await.unwrap();

    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].source, "plato");
    assert_eq!(connections[0].target, "socrates");
    assert_eq!(connections[0].kind, RelationKind::Mentor);
    assert!(connections[0].description.contains("teacher"));
}

#[tokio::test]
async fn test_batch_discovery_flattens_connections() {
    let orchestrator = philosophers(Duration::ZERO);
    let names = vec!["Socrates".to_string(), "Plato".to_string()];
    orchestrator.scrape_many(&names).await;

    let ids = vec![
        "plato".to_string(),
        "socrates".to_string(),
        "aristotle".to_string(),
    ];
    let outcome = orchestrator.discover_relationships_many(&ids).await;

    // Aristotle was never scraped, so his page 404s.
    assert_eq!(outcome.failure_count(), 1);
    assert!(outcome
        .successful
        .iter()
        .any(|c| c.source == "plato" && c.target == "socrates"));
}

#[tokio::test]
async fn test_classify_and_reinforce_roundtrip() {
    let orchestrator = philosophers(Duration::ZERO);

    let result = orchestrator.classify_relationship(
        "Socrates was the teacher and mentor of Plato.",
        "socrates",
        "plato",
    );
    assert_eq!(result.kind, Some(RelationKind::Mentor));

    let sample = "an unusual phrase repeated here, an unusual phrase indeed";
    orchestrator.reinforce(sample, RelationKind::Friend);
    assert!(orchestrator
        .lexicon()
        .weight(RelationKind::Friend, "unusual")
        .is_some());
}

#[tokio::test]
async fn test_entity_extraction_passthrough() {
    let orchestrator = philosophers(Duration::ZERO);

    let entities =
        orchestrator.extract_entities("Isaac Newton corresponded with Gottfried Leibniz.");

    assert!(entities.contains(&"Isaac Newton".to_string()));
    assert!(entities.contains(&"Gottfried Leibniz".to_string()));
}
