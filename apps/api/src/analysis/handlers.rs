//! Axum route handlers for the analysis API.

use axum::{extract::State, Json};

use crate::analysis::models::{AnalysisRequest, AnalysisResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /analyze-jobs
///
/// Scrapes the jobs page, extracts postings, and returns those that best fit the résumé.
pub async fn handle_analyze_jobs(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let params = request.resolve(state.analyzer.default_jobs_page_url())?;
    let recommended_jobs = state.analyzer.analyze(&params).await?;

    Ok(Json(AnalysisResponse { recommended_jobs }))
}
