use std::sync::Arc;

use crate::analysis::pipeline::JobAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the scraping and completion clients. Immutable, so requests share it freely.
    pub analyzer: Arc<JobAnalyzer>,
}
