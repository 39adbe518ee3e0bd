use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobfinder::analysis::pipeline::JobAnalyzer;
use jobfinder::config::Config;
use jobfinder::llm_client::LlmClient;
use jobfinder::routes::build_router;
use jobfinder::scraping::FirecrawlClient;
use jobfinder::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Finder API v{}", env!("CARGO_PKG_VERSION"));

    let scraper = FirecrawlClient::new(
        config.firecrawl_api_key.clone(),
        config.firecrawl_base_url.clone(),
        config.job_detail_click_selector.clone(),
        config.upstream_timeout,
    )?;
    info!(
        "Scraping client initialized ({}, click selector: {:?})",
        config.firecrawl_base_url, config.job_detail_click_selector
    );

    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
        config.upstream_timeout,
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    let analyzer = JobAnalyzer::new(
        Arc::new(scraper),
        Arc::new(llm),
        config.default_jobs_page_url.clone(),
    );

    let state = AppState {
        analyzer: Arc::new(analyzer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}
