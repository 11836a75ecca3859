// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_composer::DashboardComposer;
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::page::PageShell;
use crate::infrastructure::static_sales::StaticSalesRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config().context("Failed to load config/dashboard")?;
    let presentation = config.presentation;

    // Fail at startup rather than on every request
    config
        .sales
        .validate()
        .context("Configured sales series is invalid")?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(StaticSalesRepository::new(config.sales));

    // Create services (application layer)
    let composer = DashboardComposer::new(presentation.headroom, presentation.dashboard_style())
        .context("Configured gauge headroom is invalid")?;
    tracing::info!("Gauge headroom set to {}", composer.headroom());
    let dashboard_service = DashboardService::new(repository, composer);

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        page: PageShell {
            title: presentation.title,
            background: presentation.background,
            plotly_js: presentation.plotly_js,
        },
    });

    // Build router (presentation layer)
    let app = router(state);

    // Start server
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Starting sales-dashboard on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
