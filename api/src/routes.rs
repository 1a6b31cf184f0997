//! HTTP routes
//!
//! Thin handlers: extract, call the application layer, render. The wire
//! shapes here (request bodies, the banner, agent records) are the contract
//! the reference front end consumes.

use axum::extract::{Path, Query as UrlQuery, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use switchboard_application::StoredRun;
use switchboard_domain::{Agent, AgentId, AgentSummary, AgentUpdate, Query, QueryResponse};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Window size for `GET /runs` when the caller does not pass `limit`
const RUNS_DEFAULT_LIMIT: usize = 20;
/// Largest window one `GET /runs` call can request
const RUNS_MAX_LIMIT: usize = 100;

/// Assembles the full HTTP surface over the shared state.
///
/// CORS is wide open because the reference front end is served from a
/// different origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/query", post(process_query))
        .route("/agents", get(list_agents))
        .route("/agents/{id}", get(get_agent).put(update_agent))
        .route("/runs", get(list_runs))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Service banner for humans poking the API root
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Switchboard API",
        "endpoints": {
            "/query": "POST - Process a query through the agent pipeline",
            "/agents": "GET - List registered agents",
            "/agents/{id}": "GET, PUT - Fetch or update one agent",
            "/runs": "GET - Completed run history, newest first",
            "/health": "GET - Health check"
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

#[derive(Debug, Deserialize)]
struct QueryRequest {
    query: String,
}

/// Runs one query through the pipeline and records the outcome in history.
///
/// A run that completed but could not be persisted is still returned to the
/// caller; only the history entry is lost.
async fn process_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let query = Query::try_new(request.query)?;
    let response = state.pipeline.execute(query).await?;

    let run = StoredRun::new(response.clone());
    if let Err(error) = state.history.save(&run).await {
        warn!("Completed run not recorded in history: {error}");
    }

    Ok(Json(response))
}

async fn list_agents(State(state): State<AppState>) -> Result<Json<Vec<AgentSummary>>, ApiError> {
    let summaries = state.directory.list_agents().await?;
    Ok(Json(summaries))
}

async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Agent>, ApiError> {
    let agent = state.directory.get_agent(&AgentId::new(id)).await?;
    Ok(Json(agent))
}

async fn update_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<AgentUpdate>,
) -> Result<Json<AgentSummary>, ApiError> {
    let summary = state
        .directory
        .update_agent(&AgentId::new(id), update)
        .await?;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
struct RunsQuery {
    limit: Option<usize>,
    offset: Option<usize>,
}

async fn list_runs(
    State(state): State<AppState>,
    UrlQuery(window): UrlQuery<RunsQuery>,
) -> Result<Json<Vec<StoredRun>>, ApiError> {
    let limit = window
        .limit
        .unwrap_or(RUNS_DEFAULT_LIMIT)
        .min(RUNS_MAX_LIMIT);
    let offset = window.offset.unwrap_or(0);
    let runs = state.history.list(limit, offset).await?;
    Ok(Json(runs))
}
