//! Job analysis pipeline.
//!
//! Flow: scrape listing page → extract apply links (LLM) → extract each job's
//!       details (one link at a time) → rank against the résumé (LLM) → cap at N.
//!
//! A failing job link is logged and skipped. Every other failure aborts the run.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::models::{AnalysisParams, ExtractedJob, RecommendedJob};
use crate::analysis::parsing::{parse_apply_links, parse_recommendations};
use crate::analysis::prompts::{link_extraction_prompt, ranking_prompt};
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::CompletionModel;
use crate::scraping::Scraper;

/// Upper bound on how much page markdown goes into the link-extraction prompt.
pub const MARKDOWN_CHAR_BUDGET: usize = 100_000;

pub struct JobAnalyzer {
    scraper: Arc<dyn Scraper>,
    model: Arc<dyn CompletionModel>,
    default_jobs_page_url: String,
}

impl JobAnalyzer {
    pub fn new(
        scraper: Arc<dyn Scraper>,
        model: Arc<dyn CompletionModel>,
        default_jobs_page_url: String,
    ) -> Self {
        Self {
            scraper,
            model,
            default_jobs_page_url,
        }
    }

    pub fn default_jobs_page_url(&self) -> &str {
        &self.default_jobs_page_url
    }

    /// Runs the full pipeline and returns at most `params.num_jobs` recommendations.
    pub async fn analyze(&self, params: &AnalysisParams) -> Result<Vec<RecommendedJob>, AppError> {
        let run_id = Uuid::new_v4();
        self.run(params)
            .instrument(info_span!("analysis", %run_id))
            .await
    }

    async fn run(&self, params: &AnalysisParams) -> Result<Vec<RecommendedJob>, AppError> {
        info!(
            "Starting job analysis for URL: {} ({} jobs requested)",
            params.jobs_page_url, params.num_jobs
        );

        let markdown = self.scraper.scrape_markdown(&params.jobs_page_url).await?;
        info!(
            "Scraped jobs page ({} chars), extracting job links",
            markdown.chars().count()
        );

        let apply_links = self.extract_apply_links(&markdown, params.num_jobs).await?;
        if apply_links.is_empty() {
            info!("No job links found on the page");
            return Ok(vec![]);
        }
        info!("Found {} job links, extracting details", apply_links.len());

        let candidates = self.collect_candidates(&apply_links).await;
        if candidates.is_empty() {
            warn!("No job details could be extracted; nothing to rank");
            return Ok(vec![]);
        }

        let mut recommended = self
            .rank(&params.resume, &candidates, params.num_jobs)
            .await?;
        recommended.truncate(params.num_jobs);

        info!("Returning {} recommended jobs", recommended.len());
        Ok(recommended)
    }

    async fn extract_apply_links(
        &self,
        markdown: &str,
        num_jobs: usize,
    ) -> Result<Vec<String>, AppError> {
        let prompt = link_extraction_prompt(truncate_chars(markdown, MARKDOWN_CHAR_BUDGET), num_jobs);
        let raw = self.model.complete(&prompt, JSON_ONLY_SYSTEM).await?;

        let mut links = parse_apply_links(&raw)?;
        links.truncate(num_jobs);
        Ok(links)
    }

    /// Extracts each link in turn. Links that fail are dropped from the pool.
    async fn collect_candidates(&self, apply_links: &[String]) -> Vec<ExtractedJob> {
        let mut candidates = Vec::with_capacity(apply_links.len());

        for link in apply_links {
            match self.scraper.extract_job(link).await {
                Ok(job) => {
                    let title = if job.job_title.is_empty() {
                        "Unknown Title"
                    } else {
                        job.job_title.as_str()
                    };
                    info!("Extracted data for job: {title}");
                    candidates.push(job);
                }
                Err(e) => warn!("Skipping {link}: {e}"),
            }
        }

        candidates
    }

    async fn rank(
        &self,
        resume: &str,
        candidates: &[ExtractedJob],
        num_jobs: usize,
    ) -> Result<Vec<RecommendedJob>, AppError> {
        let jobs_json = serde_json::to_string_pretty(candidates)
            .context("serializing candidate pool")?;
        let prompt = ranking_prompt(resume, &jobs_json, num_jobs);
        let raw = self.model.complete(&prompt, JSON_ONLY_SYSTEM).await?;
        parse_recommendations(&raw)
    }
}

/// Returns the first `max` characters of `text`, cut on a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
