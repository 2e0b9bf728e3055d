//! Axum route handlers for the scheduler API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::scheduler::{SchedulerStatus, TriggerResponse};
use crate::state::AppState;
use crate::store::blogs::Blog;
use crate::store::settings::SettingsPatch;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateIntervalRequest {
    pub interval_minutes: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub auto_post_enabled: bool,
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/scheduler/status
pub async fn handle_status(State(state): State<AppState>) -> Json<SchedulerStatus> {
    Json(state.scheduler.status().await)
}

/// GET /api/scheduler/history
///
/// Auto-generated posts, newest first.
pub async fn handle_history(State(state): State<AppState>) -> Json<Vec<Blog>> {
    Json(state.scheduler.history().await)
}

/// PUT /api/scheduler/toggle
///
/// Flips the stored flag, then starts or stops the timer according to the
/// effective (env-resolved) settings.
pub async fn handle_toggle(
    State(state): State<AppState>,
) -> Result<Json<ToggleResponse>, AppError> {
    let enabled = !state.settings.get().await.auto_post_enabled;
    state
        .settings
        .put(SettingsPatch {
            auto_post_enabled: Some(enabled),
            ..Default::default()
        })
        .await?;

    let effective = state.settings.effective().await;
    if effective.auto_post_enabled {
        state.scheduler.start(effective.post_interval_minutes).await;
    } else {
        state.scheduler.stop().await;
    }

    Ok(Json(ToggleResponse {
        auto_post_enabled: enabled,
        message: if enabled {
            "Auto-posting enabled".to_string()
        } else {
            "Auto-posting disabled".to_string()
        },
    }))
}

/// PUT /api/scheduler/interval
pub async fn handle_update_interval(
    State(state): State<AppState>,
    Json(request): Json<UpdateIntervalRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let minutes = request
        .interval_minutes
        .filter(|m| *m >= 1)
        .ok_or_else(|| AppError::Validation("intervalMinutes must be at least 1".to_string()))?;

    state
        .settings
        .put(SettingsPatch {
            post_interval_minutes: Some(minutes),
            ..Default::default()
        })
        .await?;

    // the running timer keeps its old cadence unless we restart it here
    let effective = state.settings.effective().await;
    if effective.auto_post_enabled {
        state
            .scheduler
            .restart(effective.post_interval_minutes)
            .await;
    }

    Ok(Json(MessageResponse {
        message: format!("Posting interval updated to {minutes} minutes"),
    }))
}

/// POST /api/scheduler/trigger
///
/// Always 200: failures come back as `{success: false, reason}` so the
/// admin UI can show them inline.
pub async fn handle_trigger(State(state): State<AppState>) -> Json<TriggerResponse> {
    Json(state.scheduler.trigger().await)
}
