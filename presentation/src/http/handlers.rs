//! Route handlers

use super::error::ApiError;
use super::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use threadsense_application::ModerateThreadInput;
use threadsense_domain::{HistoryEntry, ModerationResult};

/// Body of `POST /api/moderate`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModerateRequest {
    /// Missing and empty are both rejected as "thread_url is required"
    #[serde(default)]
    pub thread_url: String,
}

/// Query of `GET /api/history`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub thread_url: Option<String>,
    pub limit: Option<usize>,
}

/// Body returned by `GET /api/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub items: Vec<HistoryEntry>,
}

pub(super) async fn moderate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ModerateRequest>, JsonRejection>,
) -> Result<Json<ModerationResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let result = state
        .moderate
        .execute(ModerateThreadInput::new(request.thread_url))
        .await?;
    Ok(Json(result))
}

pub(super) async fn history_handler(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let max = state.options.max_history_items;
    let limit = query.limit.unwrap_or(max).min(max);

    let history = state.moderate.history();
    let items = match query.thread_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => history.for_thread(url).into_iter().take(limit).collect(),
        _ => history.recent(limit),
    };
    Ok(Json(HistoryResponse { items }))
}

pub(super) async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    let agents: Vec<&str> = state
        .moderate
        .roster()
        .profiles()
        .map(|p| p.agent_id.as_str())
        .collect();

    Json(json!({
        "ok": true,
        "time": time,
        "api_provider": &*state.backend_name,
        "agents": agents,
    }))
}
