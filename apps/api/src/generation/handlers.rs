//! Axum route handlers for the generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::composer::{compose_blog, ComposedBlog};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateContentRequest {
    pub keyword: Option<String>,
    pub additional_context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentResponse {
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateTitleRequest {
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateTitleResponse {
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateMetaRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMetaResponse {
    pub meta_description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HumanizeRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeResponse {
    pub humanized_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteBlogRequest {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub additional_context: Option<String>,
    #[serde(default = "default_auto_humanize")]
    pub auto_humanize: bool,
}

fn default_auto_humanize() -> bool {
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate/content
///
/// Generates a full Markdown blog post for a keyword.
pub async fn handle_generate_content(
    State(state): State<AppState>,
    Json(request): Json<GenerateContentRequest>,
) -> Result<Json<GenerateContentResponse>, AppError> {
    let keyword = require(request.keyword, "Keyword is required")?;
    let additional_context = request.additional_context.unwrap_or_default();

    let content = state
        .generator
        .generate_content(&keyword, &additional_context)
        .await?;

    Ok(Json(GenerateContentResponse { content }))
}

/// POST /api/generate/title
pub async fn handle_generate_title(
    State(state): State<AppState>,
    Json(request): Json<GenerateTitleRequest>,
) -> Result<Json<GenerateTitleResponse>, AppError> {
    let keyword = require(request.keyword, "Keyword is required")?;

    let title = state.generator.generate_title(&keyword).await?;

    Ok(Json(GenerateTitleResponse { title }))
}

/// POST /api/generate/meta-description
///
/// Needs at least one of title/content to work from.
pub async fn handle_generate_meta(
    State(state): State<AppState>,
    Json(request): Json<GenerateMetaRequest>,
) -> Result<Json<GenerateMetaResponse>, AppError> {
    let title = request.title.unwrap_or_default();
    let content = request.content.unwrap_or_default();
    if title.is_empty() && content.is_empty() {
        return Err(AppError::Validation(
            "Title or content is required".to_string(),
        ));
    }

    let meta_description = state
        .generator
        .generate_meta_description(&title, &content)
        .await?;

    Ok(Json(GenerateMetaResponse { meta_description }))
}

/// POST /api/generate/humanize
///
/// Always succeeds: a remote humanizer failure degrades to the local pass.
pub async fn handle_humanize(
    State(state): State<AppState>,
    Json(request): Json<HumanizeRequest>,
) -> Result<Json<HumanizeResponse>, AppError> {
    let text = require(request.text, "Text is required")?;

    let humanized_text = state.humanizer.humanize(&text).await;

    Ok(Json(HumanizeResponse { humanized_text }))
}

/// POST /api/generate/complete-blog
///
/// Full pipeline: title → content → humanize (optional) → meta → slug.
/// Returns the composed fields without persisting; saving is a separate
/// POST /api/blogs from the editor.
pub async fn handle_complete_blog(
    State(state): State<AppState>,
    Json(request): Json<CompleteBlogRequest>,
) -> Result<Json<ComposedBlog>, AppError> {
    let keyword = require(request.keyword, "Keyword is required")?;
    let additional_context = request.additional_context.unwrap_or_default();

    let composed = compose_blog(
        state.generator.as_ref(),
        &state.humanizer,
        &keyword,
        &additional_context,
        request.auto_humanize,
    )
    .await?;

    Ok(Json(composed))
}

fn require(value: Option<String>, message: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(message.to_string())),
    }
}
