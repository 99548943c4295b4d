//! HTTP server for liveness checks and manual pipeline triggering

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::common::errors::{BotError, Result};
use crate::common::types::{RunHistory, RunReport};
use crate::pipeline::Pipeline;

/// Shared state for the HTTP server
pub struct ServerState {
    /// When the process started
    pub started_at: DateTime<Utc>,
    /// The pipeline, shared with the scheduler; the mutex doubles as
    /// the at-most-one-run-at-a-time guard
    pub pipeline: Arc<Mutex<Pipeline>>,
    /// Recorded run reports
    pub history: Arc<RwLock<RunHistory>>,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    uptime_seconds: i64,
    runs_recorded: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_run: Option<RunReport>,
}

#[derive(Debug, Serialize)]
struct TriggerResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<RunReport>,
}

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/status", get(status))
        .route("/run", post(trigger_run))
        .with_state(state)
}

/// Bind and serve until the process exits
pub async fn serve(state: Arc<ServerState>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BotError::Internal(format!("failed to bind {}: {}", addr, e)))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| BotError::Internal(e.to_string()))
}

async fn liveness() -> &'static str {
    "OK"
}

async fn status(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    let history = state.history.read().await;
    Json(StatusResponse {
        status: "alive",
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        runs_recorded: history.len(),
        last_run: history.latest().cloned(),
    })
}

/// Synchronously execute one pipeline run.
///
/// The scheduler holds the same lock while a scheduled run executes, so
/// a manual trigger can never overlap one; it gets a 409 instead.
async fn trigger_run(State(state): State<Arc<ServerState>>) -> Response {
    let mut pipeline = match state.pipeline.try_lock() {
        Ok(guard) => guard,
        Err(_) => {
            return (
                StatusCode::CONFLICT,
                Json(TriggerResponse {
                    status: "busy",
                    detail: Some("a run is already in progress".to_string()),
                    report: None,
                }),
            )
                .into_response();
        }
    };

    info!("Manual pipeline trigger received");
    let report = pipeline.run_once().await;
    drop(pipeline);

    state.history.write().await.push(report.clone());

    (
        StatusCode::OK,
        Json(TriggerResponse {
            status: "completed",
            detail: None,
            report: Some(report),
        }),
    )
        .into_response()
}
