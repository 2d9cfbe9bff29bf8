use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::backend::{ChatMessage, MappingSuggestion};
use crate::field::SearchResult;
use crate::import;
use crate::query::SearchEngine;
use crate::server::AppState;

/// Default page size when the client does not ask for one
pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Deserialize)]
pub struct MapRequest {
    #[serde(rename = "sourceData")]
    pub source_data: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn internal(e: impl std::fmt::Display) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn bad_request(e: impl std::fmt::Display) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResult>, HandlerError> {
    let store = state.store.lock().await;
    let engine = SearchEngine::new(&store);

    let result = engine
        .search(
            params.query.as_deref().unwrap_or(""),
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            params.offset.unwrap_or(0),
        )
        .map_err(internal)?;

    Ok(Json(result))
}

pub async fn count(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let store = state.store.lock().await;
    let count = store.count().map_err(internal)?;
    Ok(Json(serde_json::json!({ "count": count })))
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let store = state.store.lock().await;
    let stats = store.stats().map_err(internal)?;
    Ok(Json(serde_json::json!({
        "fields": stats.fields,
        "sessions": stats.sessions,
    })))
}

/// Replace the dataset with the uploaded delimited text.
pub async fn import(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let fields = import::parse_delimited(&body).map_err(bad_request)?;

    let mut store = state.store.lock().await;
    let imported = store.replace_all(&fields, None).map_err(internal)?;

    Ok(Json(serde_json::json!({ "imported": imported })))
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let text = tokio::task::spawn_blocking(move || {
        state.backend.chat(&request.prompt, &request.history)
    })
    .await
    .map_err(internal)?
    .map_err(|e| {
        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(serde_json::json!({ "text": text })))
}

/// Mapping degrades to an empty suggestion list on backend failure,
/// matching the client contract.
pub async fn map_fields(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MapRequest>,
) -> Result<Json<Vec<MappingSuggestion>>, HandlerError> {
    let suggestions =
        tokio::task::spawn_blocking(move || state.backend.map_fields(&request.source_data))
            .await
            .map_err(internal)?;

    Ok(Json(suggestions))
}
