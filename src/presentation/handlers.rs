// HTTP request handlers
use crate::domain::dashboard::{DashboardSnapshot, DetailChart};
use crate::domain::pollutant::Pollutant;
use crate::domain::summary::{LimitConfig, LimitUpdate};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Response},
    Json,
};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio_stream::wrappers::WatchStream;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no dashboard snapshot available yet")]
    NotReady,
    #[error("unknown pollutant parameter: {0}")]
    UnknownPollutant(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UnknownPollutant(_) => StatusCode::BAD_REQUEST,
            ApiError::Backend(_) => StatusCode::BAD_GATEWAY,
        };
        if let ApiError::Backend(e) = &self {
            tracing::error!(error = %e, "backend request failed");
        }
        (
            status,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

#[derive(Deserialize)]
pub struct DetailQuery {
    pub param: Option<String>,
    pub hours: Option<u32>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Latest dashboard snapshot; 503 until the first successful poll.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let snapshot = state.poller.latest().ok_or(ApiError::NotReady)?;
    Ok(Json(snapshot.as_ref().clone()))
}

/// SSE stream of snapshots, one event per refresh. Each event carries the
/// complete snapshot; clients replace, never patch.
pub async fn stream_dashboard(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = WatchStream::new(state.poller.subscribe())
        .filter_map(|snapshot| async move { snapshot })
        .map(|snapshot| Event::default().json_data(snapshot.as_ref()));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Single-pollutant history detail for one boiler.
pub async fn get_history_detail(
    Path(boiler): Path<String>,
    Query(query): Query<DetailQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DetailChart>, ApiError> {
    let param = query.param.unwrap_or_else(|| "nox".to_string());
    let kind =
        Pollutant::from_param(&param).ok_or_else(|| ApiError::UnknownPollutant(param.clone()))?;
    let detail = state
        .dashboard_service
        .history_detail(&boiler, kind, query.hours)
        .await?;
    Ok(Json(detail))
}

pub async fn get_limits(State(state): State<Arc<AppState>>) -> Result<Json<LimitConfig>, ApiError> {
    Ok(Json(state.dashboard_service.limits().await?))
}

pub async fn put_limits(
    State(state): State<Arc<AppState>>,
    Json(limits): Json<LimitConfig>,
) -> Result<StatusCode, ApiError> {
    state.dashboard_service.update_limits(&limits).await?;
    state.poller.refresh_now();
    Ok(StatusCode::NO_CONTENT)
}

/// Fire-and-forget single-key limit update, then an immediate refresh so
/// the displayed numbers catch up without waiting a full poll interval.
pub async fn post_limit(
    State(state): State<Arc<AppState>>,
    Json(update): Json<LimitUpdate>,
) -> Result<StatusCode, ApiError> {
    state.dashboard_service.update_limit(&update).await?;
    state.poller.refresh_now();
    Ok(StatusCode::NO_CONTENT)
}
