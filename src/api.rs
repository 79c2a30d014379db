//! HTTP boundary: request validation and JSON transport around the engine.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::catalog::{Catalog, MemoryCatalog};
use crate::command::Command;
use crate::constants::DEFAULT_SCRIPT_NAME;
use crate::error::ExportError;
use crate::export::{export, validate_script_name, ExportFormat};
use crate::search::SearchEngine;
use crate::suggest::{AiSuggestion, SuggestionProvider};

pub struct AppState {
    pub engine: SearchEngine<MemoryCatalog>,
    pub suggester: Option<Arc<dyn SuggestionProvider>>,
}

pub type SharedState = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub command_ids: Vec<String>,
    pub script_name: Option<String>,
    pub export_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AiSearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct AiExplainRequest {
    pub command: String,
}

#[derive(Debug, Serialize)]
pub struct AiExplainResponse {
    pub explanation: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    NotFound(&'static str),
    Unavailable(&'static str),
    Internal(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(json!({ "error": msg }))).into_response()
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/commands", get(all_commands))
        .route("/api/commands/search", get(search_commands))
        .route("/api/commands/category/{category}", get(commands_by_category))
        .route("/api/commands/export", post(export_commands))
        .route("/api/ai/search", post(ai_search))
        .route("/api/ai/explain", post(ai_explain))
        .with_state(state)
}

async fn all_commands(State(state): State<SharedState>) -> Json<Vec<Command>> {
    Json(state.engine.catalog().get_all().into_iter().cloned().collect())
}

async fn search_commands(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Command>> {
    let query = params.query.unwrap_or_default();
    let results = state.engine.search(&query, params.category.as_deref());
    info!(
        query = %query,
        category = params.category.as_deref().unwrap_or("all"),
        results = results.len(),
        "search"
    );
    Json(results.into_iter().cloned().collect())
}

async fn commands_by_category(
    State(state): State<SharedState>,
    Path(category): Path<String>,
) -> Json<Vec<Command>> {
    Json(
        state
            .engine
            .catalog()
            .get_by_category(&category)
            .into_iter()
            .cloned()
            .collect(),
    )
}

async fn export_commands(
    State(state): State<SharedState>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    if req.command_ids.is_empty() {
        return Err(ApiError::BadRequest("Command IDs are required"));
    }
    let name = req.script_name.as_deref().unwrap_or(DEFAULT_SCRIPT_NAME);
    validate_script_name(name).map_err(|_| ApiError::BadRequest("Invalid script name"))?;

    let commands = state.engine.catalog().get_by_ids(&req.command_ids);
    let format = req
        .export_type
        .as_deref()
        .map(ExportFormat::from_name)
        .unwrap_or_default();

    let script = export(&commands, format, name, Utc::now()).map_err(|e| match e {
        ExportError::NoCommands => ApiError::NotFound("No commands found"),
        ExportError::InvalidName(_) => ApiError::BadRequest("Invalid script name"),
    })?;

    info!(
        requested = req.command_ids.len(),
        exported = commands.len(),
        file = %script.filename,
        "export"
    );
    let disposition = format!("attachment; filename=\"{}\"", script.filename);
    Ok((
        [
            (header::CONTENT_TYPE, script.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        script.content,
    )
        .into_response())
}

fn provider(state: &AppState) -> Result<&Arc<dyn SuggestionProvider>, ApiError> {
    state
        .suggester
        .as_ref()
        .ok_or(ApiError::Unavailable("AI suggestions are not configured"))
}

async fn ai_search(
    State(state): State<SharedState>,
    Json(req): Json<AiSearchRequest>,
) -> Result<Json<AiSuggestion>, ApiError> {
    let suggester = provider(&state)?;
    suggester.suggest(&req.query).await.map(Json).map_err(|e| {
        error!(error = %e, "AI search failed");
        ApiError::Internal("Failed to process AI search")
    })
}

async fn ai_explain(
    State(state): State<SharedState>,
    Json(req): Json<AiExplainRequest>,
) -> Result<Json<AiExplainResponse>, ApiError> {
    let suggester = provider(&state)?;
    let explanation = suggester.explain(&req.command).await.map_err(|e| {
        error!(error = %e, "AI explanation failed");
        ApiError::Internal("Failed to generate AI explanation")
    })?;
    Ok(Json(AiExplainResponse { explanation }))
}
