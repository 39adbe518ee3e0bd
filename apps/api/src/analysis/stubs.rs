//! Deterministic in-memory stand-ins for the scraping and completion services.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::analysis::models::ExtractedJob;
use crate::llm_client::{CompletionModel, LlmError};
use crate::scraping::{ScrapeError, Scraper};

/// Serves one fixed page and a fixed set of job records. Links without a record fail.
#[derive(Default)]
pub struct StubScraper {
    /// `None` makes the page scrape report failure.
    pub markdown: Option<String>,
    pub jobs: HashMap<String, ExtractedJob>,
    pub scraped: Mutex<Vec<String>>,
    pub extracted: Mutex<Vec<String>>,
}

impl StubScraper {
    pub fn with_page(markdown: &str) -> Self {
        Self {
            markdown: Some(markdown.to_string()),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn job(mut self, link: &str, title: &str, compensation: &str) -> Self {
        self.jobs.insert(
            link.to_string(),
            ExtractedJob {
                job_title: title.to_string(),
                sub_division_of_organization: "Engineering".to_string(),
                key_skills: vec!["Rust".to_string()],
                compensation: compensation.to_string(),
                location: "Remote".to_string(),
                apply_link: link.to_string(),
            },
        );
        self
    }

    pub fn scraped_urls(&self) -> Vec<String> {
        self.scraped.lock().unwrap().clone()
    }

    pub fn extracted_urls(&self) -> Vec<String> {
        self.extracted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Scraper for StubScraper {
    async fn scrape_markdown(&self, url: &str) -> Result<String, ScrapeError> {
        self.scraped.lock().unwrap().push(url.to_string());
        self.markdown
            .clone()
            .ok_or_else(|| ScrapeError::Unsuccessful("stubbed scrape failure".to_string()))
    }

    async fn extract_job(&self, url: &str) -> Result<ExtractedJob, ScrapeError> {
        self.extracted.lock().unwrap().push(url.to_string());
        self.jobs.get(url).cloned().ok_or(ScrapeError::Status {
            status: 404,
            message: format!("no job at {url}"),
        })
    }
}

/// Answers prompts with scripted replies, in order.
#[derive(Default)]
pub struct StubModel {
    replies: Mutex<VecDeque<String>>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubModel {
    pub fn replying(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for StubModel {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyContent)
    }
}
