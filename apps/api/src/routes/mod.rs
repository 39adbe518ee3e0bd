pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyze-jobs", post(handlers::handle_analyze_jobs))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::models::DEFAULT_JOBS_PAGE_URL;
    use crate::analysis::pipeline::JobAnalyzer;
    use crate::analysis::stubs::{StubModel, StubScraper};

    const LINKS: &str = r#"{"apply_links": ["https://jobs.example.com/1", "https://jobs.example.com/2"]}"#;
    const RANKED: &str = r#"[{"job_title": "Staff Rust Engineer", "compensation": "$220k", "apply_link": "https://jobs.example.com/1"}]"#;

    fn scraper() -> StubScraper {
        StubScraper::with_page("[Apply](https://jobs.example.com/1) [Apply](https://jobs.example.com/2)")
            .job("https://jobs.example.com/1", "Staff Rust Engineer", "$220k")
            .job("https://jobs.example.com/2", "SRE", "")
    }

    fn router(scraper: Arc<StubScraper>, model: Arc<StubModel>) -> Router {
        let analyzer = JobAnalyzer::new(scraper, model, DEFAULT_JOBS_PAGE_URL.to_string());
        build_router(AppState {
            analyzer: Arc::new(analyzer),
        })
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze-jobs")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_jobs_returns_recommendations() {
        let app = router(Arc::new(scraper()), Arc::new(StubModel::replying(&[LINKS, RANKED])));

        let response = app
            .oneshot(post_json(json!({
                "resume": "Rust engineer",
                "jobs_page_url": "https://jobs.example.com",
                "num_jobs": 2
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(
            body,
            json!({"recommended_jobs": [{
                "job_title": "Staff Rust Engineer",
                "compensation": "$220k",
                "apply_link": "https://jobs.example.com/1"
            }]})
        );
    }

    #[tokio::test]
    async fn test_omitted_url_scrapes_default_page() {
        let scraper = Arc::new(scraper());
        let app = router(scraper.clone(), Arc::new(StubModel::replying(&[LINKS, RANKED])));

        let response = app
            .oneshot(post_json(json!({"resume": "Rust engineer"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(scraper.scraped_urls(), vec![DEFAULT_JOBS_PAGE_URL]);
    }

    #[tokio::test]
    async fn test_scrape_failure_returns_error_without_jobs() {
        let app = router(
            Arc::new(StubScraper::failing()),
            Arc::new(StubModel::replying(&[LINKS, RANKED])),
        );

        let response = app
            .oneshot(post_json(json!({"resume": "Rust engineer"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert!(body.get("recommended_jobs").is_none());
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("Failed to scrape jobs page"));
    }

    #[tokio::test]
    async fn test_non_json_model_output_is_bad_request() {
        let app = router(
            Arc::new(scraper()),
            Arc::new(StubModel::replying(&["Here are some great jobs!"])),
        );

        let response = app
            .oneshot(post_json(json!({"resume": "Rust engineer"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "MALFORMED_MODEL_OUTPUT");
    }

    #[tokio::test]
    async fn test_num_jobs_out_of_range_is_rejected() {
        let model = Arc::new(StubModel::replying(&[LINKS, RANKED]));
        let app = router(Arc::new(scraper()), model.clone());

        let response = app
            .oneshot(post_json(json!({"resume": "Rust engineer", "num_jobs": 11})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(Arc::new(scraper()), Arc::new(StubModel::default()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "jobfinder-api");
    }
}
