//! Scraping — turns web pages into markdown or schema-shaped job records.
//!
//! Rendering and crawling happen in the remote scraping service. This module only
//! shapes the requests and classifies the answers.

use async_trait::async_trait;
use thiserror::Error;

use crate::analysis::models::ExtractedJob;

pub mod firecrawl;

pub use firecrawl::FirecrawlClient;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("scraping service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("scraping service reported failure: {0}")]
    Unsuccessful(String),

    #[error("scraping service response is missing `{0}`")]
    MissingData(&'static str),

    #[error("scraping request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("could not decode scraping response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ScrapeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ScrapeError::Timeout
        } else {
            ScrapeError::Http(e)
        }
    }
}

/// The scraping backend the analysis pipeline talks to.
///
/// Carried in `AppState` as `Arc<dyn Scraper>`.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Renders `url` and returns its content as markdown.
    async fn scrape_markdown(&self, url: &str) -> Result<String, ScrapeError>;

    /// Extracts a single job posting's details from `url`.
    async fn extract_job(&self, url: &str) -> Result<ExtractedJob, ScrapeError>;
}
