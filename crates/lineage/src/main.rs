use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

use lineage_core::{CrawlConfig, GraphStore, MemoryGraph, Orchestrator, RelationKind};

#[derive(Parser)]
#[command(
    name = "lineage",
    about = "Historical figure crawler and relationship graph builder",
    version
)]
struct Cli {
    /// Encyclopedia root URL
    #[arg(long, global = true, default_value = "https://en.wikipedia.org")]
    base_url: String,
    /// Pause before each batch request, in milliseconds
    #[arg(long, global = true, default_value_t = 1000)]
    delay_ms: u64,
    /// Per-request timeout, in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape figures, discover their connections, and print the graph
    Scrape {
        /// Figure names, e.g. "Isaac Newton"
        names: Vec<String>,
    },
    /// Extract candidate person names from text
    Entities {
        /// Text to scan
        text: String,
    },
    /// Classify the relationship a text describes between two figures
    Classify {
        /// Text describing the relationship
        text: String,
        /// First figure name
        source: String,
        /// Second figure name
        target: String,
    },
    /// Search the encyclopedia for article titles
    Search {
        /// Search query
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = CrawlConfig {
        base_url: cli.base_url.clone(),
        politeness_delay_ms: cli.delay_ms,
        request_timeout_seconds: cli.timeout,
        ..CrawlConfig::default()
    };
    let orchestrator = Arc::new(Orchestrator::new(config)?);

    match cli.command {
        Commands::Scrape { names } => run_scrape(&orchestrator, &names).await,
        Commands::Entities { text } => run_entities(&orchestrator, &text),
        Commands::Classify {
            text,
            source,
            target,
        } => run_classify(&orchestrator, &text, &source, &target),
        Commands::Search { query } => run_search(&orchestrator, &query).await,
    }
}

async fn run_scrape(orchestrator: &Arc<Orchestrator>, names: &[String]) -> Result<()> {
    anyhow::ensure!(!names.is_empty(), "no figure names given");

    let graph = MemoryGraph::new();

    let scraped = orchestrator.scrape_many(names).await;
    if let Some(summary) = scraped.failure_summary() {
        warn!("{summary}");
    }

    let ids: Vec<String> = scraped
        .successful
        .iter()
        .map(|person| person.id.clone())
        .collect();
    for person in scraped.successful {
        graph.upsert_person(person);
    }

    let discovered = orchestrator.discover_relationships_many(&ids).await;
    if let Some(summary) = discovered.failure_summary() {
        warn!("{summary}");
    }
    for connection in discovered.successful {
        graph.upsert_connection(connection);
    }

    println!("{}", serde_json::to_string_pretty(&graph.snapshot())?);
    Ok(())
}

fn run_entities(orchestrator: &Arc<Orchestrator>, text: &str) -> Result<()> {
    let entities = orchestrator.extract_entities(text);
    println!("{}", serde_json::to_string_pretty(&entities)?);
    Ok(())
}

fn run_classify(
    orchestrator: &Arc<Orchestrator>,
    text: &str,
    source: &str,
    target: &str,
) -> Result<()> {
    // Seed the registry so the figures count as known.
    orchestrator.registry().insert(source);
    orchestrator.registry().insert(target);

    let result = orchestrator.classify_relationship(text, source, target);
    // Named classifications feed back into the lexicon.
    if let Some(kind) = result.kind {
        if kind != RelationKind::Associated {
            orchestrator.reinforce(text, kind);
        }
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run_search(orchestrator: &Arc<Orchestrator>, query: &str) -> Result<()> {
    let hits = orchestrator.search(query).await?;
    println!("{}", serde_json::to_string_pretty(&hits)?);
    Ok(())
}
