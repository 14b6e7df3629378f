use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::catalog::{Task, SUPPORTED_LANGUAGES};
use crate::dispatch::{self, CodeRequest};
use crate::error::ApiError;
use crate::normalize::CodeResult;
use crate::provider::Provider;

/// Immutable per-process state shared by all handlers. Requests never write
/// to it, so no locking is involved.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn Provider>,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct LanguagesResponse {
    languages: &'static [&'static str],
}

#[derive(Serialize)]
struct TasksResponse {
    tasks: Vec<&'static str>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    supported_languages: usize,
    supported_tasks: usize,
}

pub fn routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/code", post(code_handler))
        .route("/api/languages", get(languages_handler))
        .route("/api/tasks", get(tasks_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn code_handler(
    State(state): State<AppState>,
    Json(req): Json<CodeRequest>,
) -> Result<Json<CodeResult>, ApiError> {
    let result =
        dispatch::handle(state.provider.as_ref(), &state.model, state.timeout, req).await?;
    Ok(Json(result))
}

async fn languages_handler() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: SUPPORTED_LANGUAGES,
    })
}

async fn tasks_handler() -> Json<TasksResponse> {
    Json(TasksResponse {
        tasks: Task::ALL.iter().map(|t| t.as_str()).collect(),
    })
}

/// Liveness only: does not probe the upstream provider, so a broken
/// credential never makes the process look dead.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        supported_languages: SUPPORTED_LANGUAGES.len(),
        supported_tasks: Task::ALL.len(),
    })
}
