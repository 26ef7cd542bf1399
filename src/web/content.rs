use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::catalog::ContentKind;
use crate::services::recommender::ContentBundle;
use crate::state::SharedState;
use crate::web::error::ApiError;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub kind: Option<String>,
}

#[derive(Deserialize)]
pub struct RecommendParams {
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub query: String,
}

#[derive(Serialize)]
pub struct SuggestionSetResponse {
    pub name: String,
    pub suggestions: Vec<String>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/content/search", get(search))
        .route("/content/:kind", get(content))
        .route("/recommendations", get(recommend))
        .route("/recommendations/:topic", get(recommend_topic))
        .route("/suggestions/:name", get(suggestions))
        .with_state(state)
}

fn parse_kind(raw: &str) -> Result<ContentKind, ApiError> {
    ContentKind::parse(raw).ok_or_else(|| ApiError::NotFound(format!("Unknown content type: {}", raw)))
}

async fn content(
    State(state): State<SharedState>,
    Path(kind): Path<String>,
) -> Result<Json<ContentBundle>, ApiError> {
    let kind = parse_kind(&kind)?;
    Ok(Json(state.companion.recommender().full(kind)))
}

async fn search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ContentBundle>, ApiError> {
    if params.q.trim().is_empty() {
        return Err(ApiError::BadRequest("Search query is required"));
    }
    let kind = params.kind.as_deref().map(parse_kind).transpose()?;
    Ok(Json(state.companion.recommender().search(&params.q, kind)))
}

async fn recommend(
    State(state): State<SharedState>,
    Query(params): Query<RecommendParams>,
) -> Json<ContentBundle> {
    Json(
        state
            .companion
            .recommender()
            .recommend(&params.content_type, &params.query),
    )
}

async fn recommend_topic(
    State(state): State<SharedState>,
    Path(topic): Path<String>,
) -> Json<ContentBundle> {
    Json(state.companion.recommender().recommendations_for(&topic))
}

async fn suggestions(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<SuggestionSetResponse>, ApiError> {
    let suggestions = state
        .companion
        .suggestions()
        .get(&name)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown suggestion set: {}", name)))?
        .to_vec();
    Ok(Json(SuggestionSetResponse { name, suggestions }))
}
