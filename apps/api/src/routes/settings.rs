//! Settings API handlers.
//!
//! Stored secrets never leave the server in full: every read path returns
//! the masked view, and the two GET endpoints for the dashboard (settings
//! and api-status) are derived from the same store.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::settings::{ApiKeysUpdate, ApiStatus, Settings, SettingsPatch};

/// GET /api/settings
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.get().await.masked())
}

/// PUT /api/settings
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<Settings>, AppError> {
    let updated = state.settings.put(patch).await?;
    Ok(Json(updated.masked()))
}

/// POST /api/settings/api-keys
pub async fn handle_update_api_keys(
    State(state): State<AppState>,
    Json(update): Json<ApiKeysUpdate>,
) -> Result<Json<Value>, AppError> {
    state.settings.update_api_keys(update).await?;
    Ok(Json(json!({ "message": "API keys updated successfully" })))
}

/// GET /api/settings/api-status
pub async fn handle_api_status(State(state): State<AppState>) -> Json<ApiStatus> {
    Json(state.settings.api_status().await)
}
