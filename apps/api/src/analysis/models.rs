use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AppError;

pub const DEFAULT_JOBS_PAGE_URL: &str =
    "https://www.google.com/about/careers/applications/jobs/results";
pub const DEFAULT_NUM_JOBS: u32 = 3;
pub const MAX_NUM_JOBS: u32 = 10;

/// Request body for `POST /analyze-jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub resume: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs_page_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_jobs: Option<u32>,
}

/// A validated request with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    pub resume: String,
    pub jobs_page_url: String,
    pub num_jobs: usize,
}

impl AnalysisRequest {
    /// Validates the request and fills defaults. A blank URL counts as omitted.
    pub fn resolve(self, default_jobs_page_url: &str) -> Result<AnalysisParams, AppError> {
        if self.resume.trim().is_empty() {
            return Err(AppError::Validation("resume cannot be empty".to_string()));
        }

        let num_jobs = self.num_jobs.unwrap_or(DEFAULT_NUM_JOBS);
        if !(1..=MAX_NUM_JOBS).contains(&num_jobs) {
            return Err(AppError::Validation(format!(
                "num_jobs must be between 1 and {MAX_NUM_JOBS}, got {num_jobs}"
            )));
        }

        let jobs_page_url = match self.jobs_page_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => default_jobs_page_url.to_string(),
        };
        let parsed = Url::parse(&jobs_page_url).map_err(|e| {
            AppError::Validation(format!("jobs_page_url '{jobs_page_url}' is invalid: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Validation(format!(
                "jobs_page_url must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(AnalysisParams {
            resume: self.resume,
            jobs_page_url,
            num_jobs: num_jobs as usize,
        })
    }
}

/// Structured details of one job posting, as filled in by the scraping service.
/// Fields the service leaves out or sets to `null` come back empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedJob {
    #[serde(deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_division_of_organization: String,
    #[serde(deserialize_with = "null_as_default")]
    pub key_skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub compensation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub apply_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedJob {
    pub job_title: String,
    /// Empty when the posting does not state compensation.
    #[serde(default, deserialize_with = "null_as_default")]
    pub compensation: String,
    pub apply_link: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub recommended_jobs: Vec<RecommendedJob>,
}
