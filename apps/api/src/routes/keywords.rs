//! Keyword pool handlers.
//!
//! Mutations return the full keyword document so the dashboard can refresh
//! its state from a single response.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::keywords::KeywordSet;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddKeywordRequest {
    pub keyword: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddSentenceRequest {
    pub sentence: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReplaceKeywordsRequest {
    pub keywords: Option<Vec<String>>,
    pub sentences: Option<Vec<String>>,
}

/// GET /api/keywords
pub async fn handle_get_keywords(State(state): State<AppState>) -> Json<KeywordSet> {
    Json(state.keywords.get().await)
}

/// PUT /api/keywords
pub async fn handle_replace_keywords(
    State(state): State<AppState>,
    Json(request): Json<ReplaceKeywordsRequest>,
) -> Result<Json<KeywordSet>, AppError> {
    let set = state
        .keywords
        .replace(request.keywords, request.sentences)
        .await?;
    Ok(Json(set))
}

/// POST /api/keywords/keyword
pub async fn handle_add_keyword(
    State(state): State<AppState>,
    Json(request): Json<AddKeywordRequest>,
) -> Result<Json<KeywordSet>, AppError> {
    let Some(keyword) = request.keyword.filter(|k| !k.is_empty()) else {
        return Err(AppError::Validation("Keyword is required".to_string()));
    };
    Ok(Json(state.keywords.add_keyword(&keyword).await?))
}

/// DELETE /api/keywords/keyword/:keyword
pub async fn handle_remove_keyword(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<KeywordSet>, AppError> {
    Ok(Json(state.keywords.remove_keyword(&keyword).await?))
}

/// POST /api/keywords/sentence
pub async fn handle_add_sentence(
    State(state): State<AppState>,
    Json(request): Json<AddSentenceRequest>,
) -> Result<Json<KeywordSet>, AppError> {
    let Some(sentence) = request.sentence.filter(|s| !s.is_empty()) else {
        return Err(AppError::Validation("Sentence is required".to_string()));
    };
    Ok(Json(state.keywords.add_sentence(&sentence).await?))
}

/// DELETE /api/keywords/sentence/:index
pub async fn handle_remove_sentence(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<KeywordSet>, AppError> {
    Ok(Json(state.keywords.remove_sentence(index).await?))
}

/// GET /api/keywords/random
pub async fn handle_random_keyword(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    match state.keywords.random_keyword().await {
        Some(keyword) => Ok(Json(json!({ "keyword": keyword }))),
        None => Err(AppError::NotFound("No keywords available".to_string())),
    }
}
