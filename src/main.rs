// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{sync::Arc, time::Duration};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::application::poller::SnapshotPoller;
use crate::infrastructure::config::{load_backend_config, load_thresholds};
use crate::infrastructure::emission_api::EmissionApiClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_history_detail, get_limits, health_check, post_limit, put_limits,
    stream_dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let backend_config = load_backend_config()?;
    let thresholds = load_thresholds()?;
    let settings = backend_config.backend;

    // Create backend client (infrastructure layer)
    let client = Arc::new(EmissionApiClient::new(
        &settings.base_url,
        Duration::from_secs(settings.timeout_secs),
    )?);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(client, thresholds);
    let poller = SnapshotPoller::spawn(
        dashboard_service.clone(),
        Duration::from_secs(settings.poll_interval_secs),
    );

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        poller,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/boilers/:boiler/history", get(get_history_detail))
        .route("/config/limits", get(get_limits).put(put_limits))
        .route("/config/limit", post(post_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    tracing::info!("Starting emission-telemetry service on {}", settings.listen_addr);

    axum::serve(
        tokio::net::TcpListener::bind(&settings.listen_addr).await?,
        router,
    )
    .await?;

    Ok(())
}
