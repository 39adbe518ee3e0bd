//! Parsing boundary for model output.
//!
//! The model is asked for bare JSON but answers in free text. Everything that reads
//! its answers goes through here, and every deviation from the expected shape becomes
//! `AppError::MalformedModelOutput`.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::analysis::models::RecommendedJob;
use crate::errors::AppError;
use crate::llm_client::strip_json_fences;

#[derive(Debug, Deserialize)]
struct ApplyLinks {
    apply_links: Vec<String>,
}

/// Parses `{"apply_links": ["..."]}`. Blank entries are dropped.
pub fn parse_apply_links(raw: &str) -> Result<Vec<String>, AppError> {
    let parsed: ApplyLinks = parse_shape(raw, "apply links")?;
    Ok(parsed
        .apply_links
        .into_iter()
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
        .collect())
}

/// Parses a JSON array of `{job_title, compensation, apply_link}` objects.
pub fn parse_recommendations(raw: &str) -> Result<Vec<RecommendedJob>, AppError> {
    parse_shape(raw, "job recommendations")
}

fn parse_shape<T: DeserializeOwned>(raw: &str, what: &str) -> Result<T, AppError> {
    let text = strip_json_fences(raw);
    if text.is_empty() {
        return Err(AppError::MalformedModelOutput(format!(
            "model returned no {what}"
        )));
    }
    serde_json::from_str(text)
        .map_err(|e| AppError::MalformedModelOutput(format!("invalid {what}: {e}")))
}
