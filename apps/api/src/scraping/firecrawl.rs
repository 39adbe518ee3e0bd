//! Firecrawl-compatible scraping client (`POST /v1/scrape`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::analysis::models::ExtractedJob;
use crate::scraping::{ScrapeError, Scraper};

pub const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 1],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    actions: Vec<Action<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extract: Option<ExtractOptions>,
}

#[derive(Debug, Serialize)]
struct Action<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    selector: &'a str,
}

#[derive(Debug, Serialize)]
struct ExtractOptions {
    schema: Value,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    data: Option<ScrapeData>,
    #[serde(alias = "message")]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
    extract: Option<Value>,
}

/// JSON schema the scraping service fills in for every job page.
pub fn job_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "job_title": {"type": "string"},
            "sub_division_of_organization": {"type": "string"},
            "key_skills": {"type": "array", "items": {"type": "string"}},
            "compensation": {"type": "string"},
            "location": {"type": "string"},
            "apply_link": {"type": "string"}
        },
        "required": [
            "job_title",
            "sub_division_of_organization",
            "key_skills",
            "compensation",
            "location",
            "apply_link"
        ]
    })
}

#[derive(Clone)]
pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    base_url: String,
    /// Element clicked before extraction, e.g. an overview tab that hides the details.
    click_selector: Option<String>,
}

impl FirecrawlClient {
    pub fn new(
        api_key: String,
        base_url: String,
        click_selector: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            click_selector,
        })
    }

    fn markdown_request<'a>(&self, url: &'a str) -> ScrapeRequest<'a> {
        ScrapeRequest {
            url,
            formats: ["markdown"],
            actions: vec![],
            extract: None,
        }
    }

    fn extract_request<'a>(&'a self, url: &'a str) -> ScrapeRequest<'a> {
        let actions = self
            .click_selector
            .as_deref()
            .map(|selector| Action {
                kind: "click",
                selector,
            })
            .into_iter()
            .collect();

        ScrapeRequest {
            url,
            formats: ["extract"],
            actions,
            extract: Some(ExtractOptions {
                schema: job_schema(),
            }),
        }
    }

    async fn send(&self, request: &ScrapeRequest<'_>) -> Result<ScrapeData, ScrapeError> {
        let response = self
            .client
            .post(format!("{}/v1/scrape", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(url = request.url, status, "scraping service answered");

        interpret_response(status, &body)
    }
}

#[async_trait]
impl Scraper for FirecrawlClient {
    async fn scrape_markdown(&self, url: &str) -> Result<String, ScrapeError> {
        self.send(&self.markdown_request(url))
            .await?
            .markdown
            .ok_or(ScrapeError::MissingData("data.markdown"))
    }

    async fn extract_job(&self, url: &str) -> Result<ExtractedJob, ScrapeError> {
        let data = self.send(&self.extract_request(url)).await?;
        job_from_extract(url, data.extract)
    }
}

/// Turns the `data.extract` payload for `url` into a job record.
/// An empty `apply_link` falls back to `url`.
fn job_from_extract(url: &str, extract: Option<Value>) -> Result<ExtractedJob, ScrapeError> {
    let extract = extract
        .filter(Value::is_object)
        .ok_or(ScrapeError::MissingData("data.extract"))?;

    let mut job: ExtractedJob = serde_json::from_value(extract)?;
    if job.apply_link.trim().is_empty() {
        job.apply_link = url.to_string();
    }
    Ok(job)
}

/// Classifies a scraping-service answer from its status code and raw body.
fn interpret_response(status: u16, body: &str) -> Result<ScrapeData, ScrapeError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ScrapeResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .unwrap_or_else(|| body.to_string());
        return Err(ScrapeError::Status { status, message });
    }

    let parsed: ScrapeResponse = serde_json::from_str(body)?;
    if !parsed.success {
        return Err(ScrapeError::Unsuccessful(
            parsed.error.unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }

    parsed.data.ok_or(ScrapeError::MissingData("data"))
}
