//! Coordinates the whole pipeline: fetch, extract, discover, and
//! classify, with per-request dedup and best-effort batch semantics.
//! All shared state (lexicon, registry, in-flight set) is owned here
//! and injected into the components that need it; there are no
//! module-level singletons.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::classify::{Classification, Classifier};
use crate::config::CrawlConfig;
use crate::connection::{Connection, RelationKind};
use crate::discover::DiscoveryEngine;
use crate::error::{Error, Result};
use crate::extract;
use crate::fetch::{PageFetcher, PageSource, SearchHit};
use crate::inflight::InFlight;
use crate::lexicon::Lexicon;
use crate::ner::EntityRecognizer;
use crate::person::Person;
use crate::registry::KnownNames;

/// Aggregate result of a batch operation. Batches are best-effort:
/// every success is kept even when siblings fail, and the failure list
/// is the aggregate error signal callers must inspect.
#[derive(Debug, Default)]
pub struct BatchOutcome<T> {
    pub successful: Vec<T>,
    pub failed: Vec<(String, Error)>,
}

impl<T> BatchOutcome<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            successful: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn add_success(&mut self, item: T) {
        self.successful.push(item);
    }

    pub fn add_failure(&mut self, key: String, error: Error) {
        self.failed.push((key, error));
    }

    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successful.len()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// True when at least one item failed. Successes are still valid.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }

    /// One-line summary of the failures, if any.
    #[must_use]
    pub fn failure_summary(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        let keys: Vec<&str> = self.failed.iter().map(|(k, _)| k.as_str()).collect();
        Some(format!(
            "{} of {} operations failed: {}",
            self.failed.len(),
            self.failed.len() + self.successful.len(),
            keys.join(", ")
        ))
    }
}

/// The pipeline coordinator. Cheap to share behind an `Arc`; batch
/// operations take `self: &Arc<Self>` so tasks can hold a handle.
pub struct Orchestrator {
    source: Arc<dyn PageSource>,
    config: CrawlConfig,
    lexicon: Arc<Lexicon>,
    registry: Arc<KnownNames>,
    in_flight: Arc<InFlight>,
    recognizer: EntityRecognizer,
    engine: DiscoveryEngine,
    classifier: Classifier,
}

impl Orchestrator {
    /// Production orchestrator backed by an HTTP fetcher.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let fetcher = PageFetcher::new(config.clone())?;
        Ok(Self::with_source(Arc::new(fetcher), config))
    }

    /// Inject an alternative page source; this is the seam tests and
    /// future caches use.
    #[must_use]
    pub fn with_source(source: Arc<dyn PageSource>, config: CrawlConfig) -> Self {
        let lexicon = Arc::new(Lexicon::seeded());
        Self {
            source,
            config,
            classifier: Classifier::new(Arc::clone(&lexicon)),
            lexicon,
            registry: Arc::new(KnownNames::new()),
            in_flight: Arc::new(InFlight::new()),
            recognizer: EntityRecognizer::new(),
            engine: DiscoveryEngine::new(),
        }
    }

    #[must_use]
    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<KnownNames> {
        &self.registry
    }

    #[must_use]
    pub fn in_flight(&self) -> &Arc<InFlight> {
        &self.in_flight
    }

    /// Scrape a single subject: fetch the page, extract attributes,
    /// and record the name in the registry. A second concurrent
    /// request for the same subject is rejected immediately with
    /// [`Error::AlreadyInFlight`] rather than queued; the in-flight
    /// entry is released on every exit path.
    pub async fn scrape_one(&self, name: &str) -> Result<Person> {
        let _guard = self
            .in_flight
            .begin(name)
            .ok_or_else(|| Error::AlreadyInFlight(name.to_string()))?;

        let page = self.source.fetch(name).await?;
        let person = extract::extract_person(name, &page);
        self.registry.insert(name);

        info!(id = %person.id, era = %person.era, "scraped subject");
        Ok(person)
    }

    /// Scrape many subjects concurrently, one task per name, each
    /// pausing for the politeness delay before it fires. All tasks run
    /// to completion; failures are aggregated next to the successes.
    pub async fn scrape_many(self: &Arc<Self>, names: &[String]) -> BatchOutcome<Person> {
        let mut tasks: JoinSet<(String, Result<Person>)> = JoinSet::new();

        for name in names {
            let this = Arc::clone(self);
            let name = name.clone();
            tasks.spawn(async move {
                tokio::time::sleep(this.config.politeness_delay()).await;
                let result = this.scrape_one(&name).await;
                (name, result)
            });
        }

        Self::drain(tasks).await
    }

    /// Rediscover connections for a subject id by re-fetching its page
    /// and scanning for every known name.
    pub async fn discover_relationships(&self, person_id: &str) -> Result<Vec<Connection>> {
        let subject = person_id.replace('-', " ");
        let page = self.source.fetch(&subject).await?;
        let content = page.content_text();

        Ok(self.engine.discover(person_id, &content, &self.registry))
    }

    /// Batch variant of [`Self::discover_relationships`]; connections
    /// from every successful subject are flattened together.
    pub async fn discover_relationships_many(
        self: &Arc<Self>,
        ids: &[String],
    ) -> BatchOutcome<Connection> {
        let mut tasks: JoinSet<(String, Result<Vec<Connection>>)> = JoinSet::new();

        for id in ids {
            let this = Arc::clone(self);
            let id = id.clone();
            tasks.spawn(async move {
                tokio::time::sleep(this.config.politeness_delay()).await;
                let result = this.discover_relationships(&id).await;
                (id, result)
            });
        }

        let nested = Self::drain(tasks).await;
        let mut outcome = BatchOutcome::new();
        outcome.failed = nested.failed;
        for connections in nested.successful {
            outcome.successful.extend(connections);
        }
        outcome
    }

    /// Candidate person names in arbitrary text.
    #[must_use]
    pub fn extract_entities(&self, sample: &str) -> Vec<String> {
        self.recognizer.extract(sample)
    }

    /// Classify the relationship a text describes between two figures.
    #[must_use]
    pub fn classify_relationship(
        &self,
        sample: &str,
        source: &str,
        target: &str,
    ) -> Classification {
        self.classifier.classify(sample, source, target)
    }

    /// Feed a confirmed sample back into the lexicon.
    pub fn reinforce(&self, sample: &str, kind: RelationKind) {
        self.lexicon.reinforce(sample, kind);
    }

    /// Encyclopedia opensearch passthrough.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        Ok(self.source.search(query).await?)
    }

    /// Barrier: wait for every task, then merge. Completion order is
    /// arbitrary, so neither list carries an ordering guarantee.
    async fn drain<T: Send + 'static>(mut tasks: JoinSet<(String, Result<T>)>) -> BatchOutcome<T> {
        let mut outcome = BatchOutcome::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(item))) => outcome.add_success(item),
                Ok((key, Err(error))) => {
                    warn!(%key, %error, "batch item failed");
                    outcome.add_failure(key, error);
                }
                Err(join_error) => {
                    warn!(%join_error, "batch task panicked");
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_outcome_partial() {
        let mut outcome: BatchOutcome<u32> = BatchOutcome::new();
        outcome.add_success(1);
        outcome.add_failure("plato".into(), Error::AlreadyInFlight("plato".into()));

        assert!(outcome.is_partial());
        assert_eq!(outcome.success_count(), 1);
        assert!(outcome.failure_summary().unwrap().contains("plato"));
    }

    #[test]
    fn test_batch_outcome_complete() {
        let outcome: BatchOutcome<u32> = BatchOutcome::new();
        assert!(!outcome.is_partial());
        assert!(outcome.failure_summary().is_none());
    }
}
