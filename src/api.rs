//! Read-only status endpoints. The queue itself is never driven over HTTP.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::error::AgentError;
use crate::queue::{QueueFs, QueueLayout};
use crate::services::reporting::{AgentStats, OutcomeReporter};

pub struct AppState {
    pub reporter: OutcomeReporter,
    pub layout: QueueLayout,
    pub fs: Arc<dyn QueueFs>,
}

#[derive(Debug, Serialize)]
pub struct QueueCounts {
    pub pending: usize,
    pub done: usize,
    pub failed: usize,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(get_stats))
        .route("/queue", get(get_queue))
        .with_state(state)
}

pub async fn run_server(state: Arc<AppState>, bind: &str) -> Result<(), AgentError> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("API Server listening on {}", bind);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<AgentStats> {
    Json(state.reporter.stats())
}

async fn get_queue(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match queue_counts(&state) {
        Ok(counts) => Json(counts).into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to read queue folders: {}", e),
        )
            .into_response(),
    }
}

fn queue_counts(state: &AppState) -> std::io::Result<QueueCounts> {
    let fs = state.fs.as_ref();
    Ok(QueueCounts {
        pending: state.layout.pending_files(fs, false)?.len(),
        done: state.layout.count(fs, &state.layout.done())?,
        failed: state.layout.count(fs, &state.layout.failed())?,
    })
}
