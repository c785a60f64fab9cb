use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CrawlConfig;
use crate::page::{ArticlePage, ParseError};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status code {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Page error: {0}")]
    Page(#[from] ParseError),
    #[error("Unexpected search response format")]
    SearchFormat,
}

pub type FetchResult<T> = Result<T, FetchError>;

/// A search hit from the encyclopedia's opensearch endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Source of parsed article pages. The production implementation is
/// [`PageFetcher`]; tests substitute canned pages, and a response
/// cache can wrap any implementation without callers noticing.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, subject: &str) -> FetchResult<ArticlePage>;

    async fn search(&self, query: &str) -> FetchResult<Vec<SearchHit>> {
        let _ = query;
        Ok(Vec::new())
    }
}

/// HTTP fetcher with bounded timeouts and a rotating user agent.
pub struct PageFetcher {
    client: Client,
    config: CrawlConfig,
}

impl PageFetcher {
    pub fn new(config: CrawlConfig) -> FetchResult<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(random_user_agent);

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    async fn get_html(&self, url: &str) -> FetchResult<String> {
        debug!(%url, "fetching page");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetch and parse the article for a subject name.
    pub async fn fetch_article(&self, subject: &str) -> FetchResult<ArticlePage> {
        let url = self.config.article_url(subject);
        let html = self.get_html(&url).await?;
        Ok(ArticlePage::parse(&html)?)
    }

    /// Opensearch lookup: up to ten title/description/url triples.
    pub async fn opensearch(&self, query: &str) -> FetchResult<Vec<SearchHit>> {
        let response = self
            .client
            .get(self.config.api_url())
            .query(&[
                ("action", "opensearch"),
                ("search", query),
                ("limit", "10"),
                ("namespace", "0"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: self.config.api_url(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        parse_opensearch(&body)
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch(&self, subject: &str) -> FetchResult<ArticlePage> {
        self.fetch_article(subject).await
    }

    async fn search(&self, query: &str) -> FetchResult<Vec<SearchHit>> {
        self.opensearch(query).await
    }
}

/// The opensearch response is a four-element array: query, titles,
/// descriptions, urls.
fn parse_opensearch(body: &serde_json::Value) -> FetchResult<Vec<SearchHit>> {
    let parts = body.as_array().ok_or(FetchError::SearchFormat)?;
    if parts.len() < 4 {
        return Err(FetchError::SearchFormat);
    }

    let titles = parts[1].as_array().ok_or(FetchError::SearchFormat)?;
    let descriptions = parts[2].as_array().ok_or(FetchError::SearchFormat)?;
    let urls = parts[3].as_array().ok_or(FetchError::SearchFormat)?;

    let hits = titles
        .iter()
        .enumerate()
        .map(|(i, title)| SearchHit {
            title: title.as_str().unwrap_or_default().to_string(),
            description: descriptions
                .get(i)
                .and_then(|d| d.as_str())
                .unwrap_or_default()
                .to_string(),
            url: urls
                .get(i)
                .and_then(|u| u.as_str())
                .unwrap_or_default()
                .to_string(),
        })
        .collect();

    Ok(hits)
}

fn random_user_agent() -> String {
    use rand::Rng;

    let agents = [
        "Mozilla/5.0 (Windows NT 10.0; rv:128.0) Gecko/20100101 Firefox/128.0",
        "Mozilla/5.0 (Windows NT 10.0; rv:115.0) Gecko/20100101 Firefox/115.0",
        "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:128.0) Gecko/20100101 Firefox/128.0",
    ];

    let mut rng = rand::rng();
    agents[rng.random_range(0..agents.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_user_agent_is_valid() {
        let ua = random_user_agent();

        assert!(ua.contains("Mozilla"));
        assert!(ua.contains("Firefox"));
    }

    #[test]
    fn test_fetcher_builds_with_defaults() {
        let fetcher = PageFetcher::new(CrawlConfig::default()).unwrap();
        assert_eq!(fetcher.config().request_timeout_seconds, 30);
    }

    #[test]
    fn test_parse_opensearch() {
        let body = serde_json::json!([
            "newton",
            ["Isaac Newton", "Newton's laws"],
            ["English mathematician", "Laws of motion"],
            ["https://en.wikipedia.org/wiki/Isaac_Newton", "https://en.wikipedia.org/wiki/Newton%27s_laws"]
        ]);

        let hits = parse_opensearch(&body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Isaac Newton");
        assert!(hits[1].url.contains("laws"));
    }

    #[test]
    fn test_parse_opensearch_rejects_short_body() {
        let body = serde_json::json!(["newton", []]);
        assert!(matches!(
            parse_opensearch(&body),
            Err(FetchError::SearchFormat)
        ));
    }
}
