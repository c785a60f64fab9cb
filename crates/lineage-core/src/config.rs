use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Crawler settings. Defaults are tuned for the public English
/// Wikipedia; point `base_url` somewhere else for mirrors or tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Root of the encyclopedia, without a trailing slash.
    pub base_url: String,
    pub connect_timeout_seconds: u32,
    pub request_timeout_seconds: u32,
    /// Fixed pause before each batch task fires. This is a politeness
    /// throttle toward the target site, not an adaptive rate limiter.
    pub politeness_delay_ms: u64,
    /// Override the rotating default user agents.
    pub user_agent: Option<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            connect_timeout_seconds: 10,
            request_timeout_seconds: 30,
            politeness_delay_ms: 1000,
            user_agent: None,
        }
    }
}

impl CrawlConfig {
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.request_timeout_seconds))
    }

    #[must_use]
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    /// Article URL for a subject name; spaces become underscores the
    /// way the encyclopedia titles its pages.
    #[must_use]
    pub fn article_url(&self, subject: &str) -> String {
        format!("{}/wiki/{}", self.base_url, subject.trim().replace(' ', "_"))
    }

    /// The MediaWiki API endpoint used for opensearch queries.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}/w/api.php", self.base_url)
    }
}
