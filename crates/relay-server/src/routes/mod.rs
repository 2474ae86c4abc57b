//! API route handlers

use axum::{extract::State, response::IntoResponse, Json};
use relay_core::{CompletionRequest, RelayError, WorkflowRun};

use crate::error::ApiError;
use crate::state::AppState;

/// Health check
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Single-shot completion
pub async fn complete(
    State(state): State<AppState>,
    Json(req): Json<CompletionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.service.ensure_credential()?;

    let service = state.service.clone();
    let text = run_blocking(move || service.complete(&req.prompt)).await?;

    Ok(Json(serde_json::json!({ "response": text })))
}

/// Run an agent pipeline and return its timeline
pub async fn agent_workflow(
    State(state): State<AppState>,
    Json(req): Json<CompletionRequest>,
) -> Result<Json<WorkflowRun>, ApiError> {
    state.service.ensure_credential()?;

    let service = state.service.clone();
    let run = run_blocking(move || service.run_workflow(&req)).await?;

    tracing::info!(
        workflow = %run.workflow,
        steps = run.timeline.len(),
        "Agent workflow completed"
    );
    Ok(Json(run))
}

/// Run a blocking core call off the async workers
///
/// Upstream calls block and back off with thread sleeps; on the blocking
/// pool that only stalls the request that issued them.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> relay_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RelayError::task(e.to_string()))?
        .map_err(ApiError::from)
}
