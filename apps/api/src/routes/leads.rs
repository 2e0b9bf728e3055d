//! Lead handlers.
//!
//! POST is hit by the public contact form, so its success body carries a
//! visitor-facing message; the rest of the endpoints back the admin table.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::leads::{Lead, NewLead, UpdateLead};

/// GET /api/leads, newest first.
pub async fn handle_list_leads(State(state): State<AppState>) -> Json<Vec<Lead>> {
    Json(state.leads.list().await)
}

/// POST /api/leads
pub async fn handle_create_lead(
    State(state): State<AppState>,
    Json(new): Json<NewLead>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if new.name.is_empty() || new.phone.is_empty() {
        return Err(AppError::Validation(
            "Name and phone are required".to_string(),
        ));
    }
    let lead = state.leads.create(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Thank you! We will contact you shortly.",
            "leadId": lead.id,
        })),
    ))
}

/// PUT /api/leads/:id
pub async fn handle_update_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateLead>,
) -> Result<Json<Lead>, AppError> {
    Ok(Json(state.leads.update(id, patch).await?))
}

/// DELETE /api/leads/:id
pub async fn handle_delete_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.leads.delete(id).await?;
    Ok(Json(json!({ "message": "Lead deleted" })))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::config::EnvOverrides;
    use crate::generation::content::ContentGenerator;
    use crate::humanizer::HumanizerClient;
    use crate::scheduler::{Scheduler, TickContext};
    use crate::store::blogs::BlogStore;
    use crate::store::keywords::KeywordStore;
    use crate::store::leads::LeadStore;
    use crate::store::settings::SettingsStore;

    struct NoopGenerator;

    #[async_trait]
    impl ContentGenerator for NoopGenerator {
        async fn generate_content(&self, _: &str, _: &str) -> Result<String, AppError> {
            Ok(String::new())
        }

        async fn generate_title(&self, _: &str) -> Result<String, AppError> {
            Ok(String::new())
        }

        async fn generate_meta_description(&self, _: &str, _: &str) -> Result<String, AppError> {
            Ok(String::new())
        }

        async fn generate_tags(&self, _: &str, _: &str) -> Result<Vec<String>, AppError> {
            Ok(vec![])
        }
    }

    fn make_state(dir: &tempfile::TempDir) -> AppState {
        let settings = SettingsStore::new(dir.path(), EnvOverrides::default());
        let keywords = KeywordStore::new(dir.path());
        let blogs = BlogStore::new(dir.path());
        let generator: Arc<dyn ContentGenerator> = Arc::new(NoopGenerator);
        let humanizer = HumanizerClient::new(settings.clone());
        let scheduler = Scheduler::new(TickContext {
            settings: settings.clone(),
            keywords: keywords.clone(),
            blogs: blogs.clone(),
            generator: Arc::clone(&generator),
            humanizer: humanizer.clone(),
        });

        AppState {
            settings,
            keywords,
            blogs,
            leads: LeadStore::new(dir.path()),
            generator,
            humanizer,
            scheduler,
        }
    }

    #[tokio::test]
    async fn test_create_requires_name_and_phone() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_state(&dir);

        let result = handle_create_lead(
            State(state.clone()),
            Json(NewLead {
                name: "Asha".to_string(),
                ..Default::default()
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(state.leads.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_returns_created_with_lead_id() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_state(&dir);

        let (status, Json(body)) = handle_create_lead(
            State(state.clone()),
            Json(NewLead {
                name: "Asha".to_string(),
                phone: "9876543210".to_string(),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert!(body["leadId"].is_string());
        assert_eq!(state.leads.list().await.len(), 1);
    }
}
