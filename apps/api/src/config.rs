use std::time::Duration;

use anyhow::{Context, Result};

use crate::analysis::models::DEFAULT_JOBS_PAGE_URL;
use crate::llm_client;
use crate::scraping::firecrawl;

const DEFAULT_CLICK_SELECTOR: &str = "#job-overview";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub firecrawl_api_key: String,
    pub firecrawl_base_url: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub default_jobs_page_url: String,
    /// `None` when the click before detail extraction is disabled.
    pub job_detail_click_selector: Option<String>,
    pub upstream_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            firecrawl_api_key: require("FIRECRAWL_API_KEY")?,
            firecrawl_base_url: or_default("FIRECRAWL_BASE_URL", firecrawl::DEFAULT_BASE_URL),
            openai_api_key: require("OPENAI_API_KEY")?,
            openai_base_url: or_default("OPENAI_BASE_URL", llm_client::DEFAULT_BASE_URL),
            openai_model: or_default("OPENAI_MODEL", llm_client::DEFAULT_MODEL),
            default_jobs_page_url: or_default("DEFAULT_JOBS_PAGE_URL", DEFAULT_JOBS_PAGE_URL),
            job_detail_click_selector: Some(or_default(
                "JOB_DETAIL_CLICK_SELECTOR",
                DEFAULT_CLICK_SELECTOR,
            ))
            .filter(|s| !s.trim().is_empty()),
            upstream_timeout: Duration::from_secs(
                or_default("UPSTREAM_TIMEOUT_SECS", "120")
                    .parse::<u64>()
                    .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: or_default("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }
}
